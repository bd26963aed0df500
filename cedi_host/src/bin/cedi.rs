//! # cedi
//!
//! Headless driver for the cedi editor: opens a file, replays commands,
//! optionally saves, and prints the resulting view.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use cedi_core::{Cursor, EditorCommand};
use cedi_host::{Editor, EditorError, FramePacer, FsDocumentIo, WaitMode};
use cedi_logger::{LogLevel, Logger, StderrSink};
use cedi_settings::create_default_registry;
use cedi_settings::persistence::load_overrides_file;
use serde::Serialize;

/// Simulated frame interval while settling animations
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
const MAX_SETTLE_FRAMES: usize = 600;

#[derive(Debug, Default)]
struct Config {
    file: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    overrides: Vec<(String, String)>,
    commands: Vec<String>,
    json_script: Option<PathBuf>,
    size: Option<(f32, f32)>,
    log_level: Option<LogLevel>,
    save: bool,
    dump: bool,
    report: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    path: Option<String>,
    lines: usize,
    cursor: Cursor,
    scroll: i64,
    tab_spaces: usize,
    dirty: bool,
    commands: usize,
    frames: u64,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cedi");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), EditorError> {
    let level = config.log_level.unwrap_or(LogLevel::Warn);
    let logger = Logger::new("cedi", Box::new(StderrSink::new(level)));
    let mut editor = Editor::new(FsDocumentIo, logger);

    let mut registry = create_default_registry();
    if let Some(path) = &config.settings_file {
        let data = load_overrides_file(path)?;
        for err in registry.import_overrides(data.to_overrides()) {
            eprintln!("Ignoring setting: {}", err);
        }
    }
    for (key, value) in &config.overrides {
        registry.set_from_str(key, value)?;
    }
    editor.apply_settings(&registry);

    if let Some((width, height)) = config.size {
        editor.resize(width, height);
    }
    if let Some(path) = &config.file {
        editor.open(path)?;
    }

    let mut pacer = FramePacer::new();
    let mut now = Duration::ZERO;
    let mut applied = 0;

    for line in &config.commands {
        let damage = editor.execute(line)?;
        applied += 1;
        if pacer.frame_end(&damage) == WaitMode::Poll {
            now = settle(&mut editor, &mut pacer, now);
        }
    }

    if let Some(path) = &config.json_script {
        for command in read_json_script(path)? {
            let damage = editor.apply(command)?;
            applied += 1;
            if pacer.frame_end(&damage) == WaitMode::Poll {
                now = settle(&mut editor, &mut pacer, now);
            }
        }
    }

    if config.save {
        editor.save()?;
    }

    if config.dump {
        println!("{}", editor.render_text());
    }

    if config.report {
        let session = editor.session();
        let report = RunReport {
            path: editor.path().map(|path| path.display().to_string()),
            lines: session.document().line_count(),
            cursor: session.cursor(),
            scroll: session.scroll(),
            tab_spaces: session.options().tab_spaces,
            dirty: session.is_dirty(),
            commands: applied,
            frames: pacer.stats().frame_count,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode report: {}", e),
        }
    }

    Ok(())
}

/// Run simulated frames until smooth scrolling comes to rest
fn settle(editor: &mut Editor<FsDocumentIo>, pacer: &mut FramePacer, mut now: Duration) -> Duration {
    for _ in 0..MAX_SETTLE_FRAMES {
        now += FRAME_INTERVAL;
        if editor.step_frame(pacer, now) == WaitMode::WaitEvents {
            break;
        }
    }
    now
}

fn read_json_script(path: &Path) -> Result<Vec<EditorCommand>, EditorError> {
    let text = fs::read_to_string(path).map_err(|source| cedi_host::IoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--set" => {
                let value = next_value(args, &mut i, "--set")?;
                let (key, value) = value
                    .split_once('=')
                    .ok_or_else(|| format!("Expected key=value, got: {}", value))?;
                config.overrides.push((key.to_string(), value.to_string()));
            }
            "--settings" => {
                config.settings_file = Some(PathBuf::from(next_value(args, &mut i, "--settings")?));
            }
            "-c" | "--commands" => {
                let value = next_value(args, &mut i, "--commands")?;
                config.commands.extend(
                    value
                        .split(';')
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
            "-s" | "--script" => {
                let path = next_value(args, &mut i, "--script")?;
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.commands.extend(
                    text.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(str::to_string),
                );
            }
            "--json-script" => {
                config.json_script = Some(PathBuf::from(next_value(args, &mut i, "--json-script")?));
            }
            "--size" => {
                let value = next_value(args, &mut i, "--size")?;
                config.size = Some(parse_size(value)?);
            }
            "--log-level" => {
                let value = next_value(args, &mut i, "--log-level")?;
                config.log_level = Some(
                    LogLevel::from_name(value).ok_or_else(|| format!("Invalid log level: {}", value))?,
                );
            }
            "--save" => config.save = true,
            "--dump" => config.dump = true,
            "--report" => config.report = true,
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("cedi"));
                process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            path => {
                if config.file.is_some() {
                    return Err(format!("Unexpected argument: {}", path));
                }
                config.file = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn next_value<'a>(args: &'a [String], i: &mut usize, option: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", option))
}

fn parse_size(value: &str) -> Result<(f32, f32), String> {
    let invalid = || format!("Invalid size: {}", value);
    let (width, height) = value.split_once('x').ok_or_else(invalid)?;
    let width: f32 = width.parse().map_err(|_| invalid())?;
    let height: f32 = height.parse().map_err(|_| invalid())?;
    Ok((width, height))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] [FILE]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --commands <CMDS>    Commands to apply, separated by ';'");
    eprintln!("  -s, --script <FILE>      Command file, one command per line");
    eprintln!("  --json-script <FILE>     JSON array of commands");
    eprintln!("  --set <KEY=VALUE>        Override a setting (repeatable)");
    eprintln!("  --settings <FILE>        Load setting overrides from JSON");
    eprintln!("  --size <WxH>             Viewport size in pixels");
    eprintln!("  --log-level <LEVEL>      debug, info, warn (default) or error");
    eprintln!("  --save                   Write the document back after the commands");
    eprintln!("  --dump                   Print the visible rows and status line");
    eprintln!("  --report                 Print a JSON summary of the session");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} notes.txt -c 'down; insert x' --save", program);
    eprintln!("  {} notes.txt --set editor.draw_whitespace=true --dump", program);
}
