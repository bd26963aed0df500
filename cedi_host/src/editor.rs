//! Editor facade
//!
//! Owns one [`EditorSession`] and everything the core leaves to the host:
//! file access, glyph metrics, key state and logging.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cedi_core::{
    parse_command, CommandParseError, CoreIoRequest, Damage, EditorCommand, EditorOptions,
    EditorSession, Frame, GlyphMetrics, LoadReport, MonospaceMetrics, Palette, Viewport,
};
use cedi_logger::{LogEntry, LogLevel, Logger};
use cedi_settings::persistence::PersistenceError;
use cedi_settings::{editor_options, SettingsError, SettingsRegistry};
use thiserror::Error;

use crate::frame::{FramePacer, WaitMode};
use crate::io::{DocumentIo, IoError};
use crate::keymap::{KeyEvent, KeyMapper};
use crate::render::{StatusInfo, TextView};

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Command error: {0}")]
    Command(CommandParseError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Settings file error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid command script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("No file name")]
    NoPath,
}

impl From<CommandParseError> for EditorError {
    fn from(err: CommandParseError) -> Self {
        EditorError::Command(err)
    }
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

/// Window size used when none is given
pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

/// The editor
pub struct Editor<I: DocumentIo> {
    session: EditorSession,
    metrics: Box<dyn GlyphMetrics>,
    io: I,
    logger: Logger,
    keymap: KeyMapper,
    palette: Palette,
    view: TextView,
    path: Option<PathBuf>,
    message: String,
}

impl<I: DocumentIo> Editor<I> {
    /// Create an editor with an empty document and default options
    pub fn new(io: I, logger: Logger) -> Self {
        Self {
            session: EditorSession::new(DEFAULT_VIEWPORT, EditorOptions::default()),
            metrics: Box::new(MonospaceMetrics::new(10.0, 20.0)),
            io,
            logger,
            keymap: KeyMapper::new(),
            palette: Palette::default(),
            view: TextView::new(),
            path: None,
            message: String::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Box<dyn GlyphMetrics>) -> Self {
        self.metrics = metrics;
        let viewport = self.session.viewport();
        self.resize(viewport.width, viewport.height);
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.resize(width, height);
        self
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.session.set_options(options);
        self
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn metrics(&self) -> &dyn GlyphMetrics {
        self.metrics.as_ref()
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Last status message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn get_content(&self) -> String {
        self.session.document().as_string()
    }

    /// Apply settings as the new editor options
    pub fn apply_settings(&mut self, registry: &SettingsRegistry) {
        let options = editor_options(registry);
        self.logger.log(
            LogEntry::new(LogLevel::Debug, "settings applied")
                .with_field("overrides", registry.list_overrides().len())
                .with_field("tab_spaces", options.tab_spaces),
        );
        self.session.set_options(options);
    }

    /// Apply one command, completing any file request it makes
    pub fn apply(&mut self, command: EditorCommand) -> EditorResult<Damage> {
        let before = *self.session.options();
        let mut damage = self.session.apply_command(command, self.metrics.as_ref());
        self.log_option_changes(&before);

        if let Some(request) = damage.request.take() {
            match request {
                CoreIoRequest::Open(path) => {
                    self.open(&path)?;
                    damage.text = Some(cedi_core::TextDamage::From(0));
                    damage.cursor_moved = true;
                    damage.scroll_changed = true;
                    damage.relayout = true;
                }
            }
        }
        Ok(damage)
    }

    /// Parse and apply a command in its text form
    pub fn execute(&mut self, line: &str) -> EditorResult<Damage> {
        let command = parse_command(line)?;
        self.apply(command)
    }

    /// Apply a `;`-separated list of commands, stopping at the first error
    pub fn execute_script(&mut self, script: &str) -> EditorResult<usize> {
        let mut applied = 0;
        for line in script.split(';').map(str::trim).filter(|line| !line.is_empty()) {
            self.execute(line)?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> EditorResult<Option<Damage>> {
        match self.keymap.map_key(event) {
            Some(command) => self.apply(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn handle_text(&mut self, ch: char) -> EditorResult<Option<Damage>> {
        match self.keymap.map_text(ch) {
            Some(command) => self.apply(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn handle_scroll(&mut self, y: f64) -> EditorResult<Option<Damage>> {
        match self.keymap.map_scroll(y) {
            Some(command) => self.apply(command).map(Some),
            None => Ok(None),
        }
    }

    /// Place the cursor under a mouse click
    pub fn click(&mut self, x: f32, y: f32) -> Option<Damage> {
        let target = self.session.layout(self.metrics.as_ref()).hit_test(x, y)?;
        Some(self.session.place_cursor(target, self.metrics.as_ref()))
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Damage {
        self.session
            .apply_command(EditorCommand::Resize { width, height }, self.metrics.as_ref())
    }

    /// Read a file into the session. On failure the current document is kept.
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditorResult<LoadReport> {
        let path = path.as_ref();
        let bytes = match self.io.read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.logger.log(
                    LogEntry::new(LogLevel::Error, "open failed")
                        .with_field("path", path.display())
                        .with_field("error", &err),
                );
                self.message = err.to_string();
                return Err(err.into());
            }
        };

        let report = self.session.load_bytes(&bytes);
        self.path = Some(path.to_path_buf());
        self.logger.log(
            LogEntry::new(LogLevel::Info, "file opened")
                .with_field("path", path.display())
                .with_field("lines", report.lines)
                .with_field("bytes", report.bytes)
                .with_field("bom", report.had_bom),
        );
        if let Some(first) = report.errors.first() {
            self.logger.log(
                LogEntry::new(LogLevel::Warn, "decode errors")
                    .with_field("path", path.display())
                    .with_field("count", report.errors.len())
                    .with_field("first_offset", first.offset)
                    .with_field("first", first),
            );
        }
        self.message = format!("{} lines", report.lines);
        Ok(report)
    }

    /// Write the document back to the file it came from
    pub fn save(&mut self) -> EditorResult<usize> {
        let path = self.path.clone().ok_or(EditorError::NoPath)?;
        self.save_as(path)
    }

    /// Write the document to `path`, which becomes the current file
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> EditorResult<usize> {
        let path = path.as_ref();
        let bytes = self.session.to_bytes();
        if let Err(err) = self.io.write(path, &bytes) {
            self.logger.log(
                LogEntry::new(LogLevel::Error, "save failed")
                    .with_field("path", path.display())
                    .with_field("error", &err),
            );
            self.message = err.to_string();
            return Err(err.into());
        }

        self.session.mark_saved();
        self.path = Some(path.to_path_buf());
        self.logger.log(
            LogEntry::new(LogLevel::Info, "file saved")
                .with_field("path", path.display())
                .with_field("bytes", bytes.len())
                .with_field("bom", self.session.had_bom()),
        );
        self.message = "Saved".to_string();
        Ok(bytes.len())
    }

    /// Advance animations by the pacer's frame time and pick the next wait mode
    pub fn step_frame(&mut self, pacer: &mut FramePacer, now: Duration) -> WaitMode {
        let elapsed = pacer.frame_begin(now);
        let damage = self.session.tick(elapsed);
        pacer.frame_end(&damage)
    }

    /// Render records for the current state
    pub fn frame(&mut self) -> Frame {
        let layout = self.session.layout(self.metrics.as_ref());
        if layout.missing_glyphs > 0 {
            self.logger.log(
                LogEntry::new(LogLevel::Warn, "missing glyphs")
                    .with_field("count", layout.missing_glyphs)
                    .with_field("fallback", self.metrics.missing_glyph_fallback()),
            );
        }
        cedi_core::build_frame(&layout, self.session.cursor(), &self.palette)
    }

    /// Console rendering of the visible rows and status line
    pub fn render_text(&self) -> String {
        let label = self.path.as_ref().map(|path| path.display().to_string());
        let status = StatusInfo {
            label: label.as_deref(),
            message: &self.message,
        };
        self.view.render(&self.session, self.metrics.as_ref(), &status)
    }

    fn log_option_changes(&mut self, before: &EditorOptions) {
        let after = *self.session.options();
        if after.tab_spaces != before.tab_spaces {
            self.logger.log(
                LogEntry::new(LogLevel::Debug, "tab width changed")
                    .with_field("from", before.tab_spaces)
                    .with_field("to", after.tab_spaces),
            );
        }
        if after.draw_whitespace != before.draw_whitespace {
            self.logger.log(
                LogEntry::new(LogLevel::Debug, "whitespace drawing toggled")
                    .with_field("enabled", after.draw_whitespace),
            );
        }
    }
}
