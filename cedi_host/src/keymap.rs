//! Device input to editor commands

use std::fmt;

use cedi_core::EditorCommand;

/// Key identity, independent of layout for the keys the editor binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    KpEnter,
    Tab,
    Backspace,
    Delete,
    Minus,
    Equal,
    KpSubtract,
    KpAdd,
    N,
    T,
    /// Any other key; text arrives separately through [`KeyMapper::map_text`]
    Other(u32),
}

/// Key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Modifier bitflags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Alt/Option key
    pub const ALT: Self = Self { bits: 1 << 1 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 2 };

    /// Combine with another modifier set
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Whether every modifier in `other` is held
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Alt is held, possibly with others
    pub fn is_alt(&self) -> bool {
        self.contains(Self::ALT)
    }

    /// Nothing is held
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut names = Vec::new();
        if self.contains(Self::CTRL) {
            names.push("ctrl");
        }
        if self.contains(Self::ALT) {
            names.push("alt");
        }
        if self.contains(Self::SHIFT) {
            names.push("shift");
        }
        write!(f, "{}", names.join("+"))
    }
}

/// A keyboard event as delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, action: KeyAction, modifiers: Modifiers) -> Self {
        Self {
            code,
            action,
            modifiers,
        }
    }

    /// Unmodified key press
    pub fn pressed(code: KeyCode) -> Self {
        Self::new(code, KeyAction::Press, Modifiers::NONE)
    }

    /// Unmodified auto-repeat
    pub fn repeat(code: KeyCode) -> Self {
        Self::new(code, KeyAction::Repeat, Modifiers::NONE)
    }

    /// Unmodified key release
    pub fn released(code: KeyCode) -> Self {
        Self::new(code, KeyAction::Release, Modifiers::NONE)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Unmodified keys that fire on press and repeat
fn binding(code: KeyCode) -> Option<EditorCommand> {
    let command = match code {
        KeyCode::Left => EditorCommand::MoveLeft,
        KeyCode::Right => EditorCommand::MoveRight,
        KeyCode::Up => EditorCommand::MoveUp,
        KeyCode::Down => EditorCommand::MoveDown,
        KeyCode::PageUp => EditorCommand::PageUp,
        KeyCode::PageDown => EditorCommand::PageDown,
        KeyCode::Enter | KeyCode::KpEnter => EditorCommand::InsertNewline,
        KeyCode::Tab => EditorCommand::InsertTab,
        KeyCode::Backspace => EditorCommand::DeletePrev,
        KeyCode::Delete => EditorCommand::DeleteNext,
        _ => return None,
    };
    Some(command)
}

fn tab_width_delta(code: KeyCode) -> Option<i32> {
    match code {
        KeyCode::Minus | KeyCode::KpSubtract => Some(-1),
        KeyCode::Equal | KeyCode::KpAdd => Some(1),
        _ => None,
    }
}

/// Translates key, text and wheel events into commands.
///
/// Holds the one piece of input state the bindings need: whether the
/// `Alt+T` tab-width chord is held.
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    resizing_tab: bool,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `Alt+T` is currently held
    pub fn is_resizing_tab(&self) -> bool {
        self.resizing_tab
    }

    pub fn map_key(&mut self, event: KeyEvent) -> Option<EditorCommand> {
        if event.code == KeyCode::T {
            match event.action {
                KeyAction::Press if event.modifiers.is_alt() => {
                    self.resizing_tab = true;
                    return None;
                }
                KeyAction::Release => {
                    self.resizing_tab = false;
                    return None;
                }
                _ => {}
            }
        }

        if event.action == KeyAction::Release {
            return None;
        }

        if self.resizing_tab {
            if let Some(delta) = tab_width_delta(event.code) {
                return Some(EditorCommand::AdjustTabWidth(delta));
            }
        }

        if event.action == KeyAction::Press && event.code == KeyCode::N && event.modifiers.is_alt()
        {
            return Some(EditorCommand::ToggleDrawWhitespace);
        }

        if event.modifiers.is_empty() {
            return binding(event.code);
        }
        None
    }

    /// Text input, one code point at a time
    pub fn map_text(&self, ch: char) -> Option<EditorCommand> {
        if ch.is_control() && ch != '\t' {
            return None;
        }
        Some(EditorCommand::InsertChar(ch))
    }

    /// Vertical wheel offset; positive `y` scrolls toward the top
    pub fn map_scroll(&self, y: f64) -> Option<EditorCommand> {
        if !y.is_finite() {
            return None;
        }
        let notches = -y.floor();
        if notches == 0.0 {
            return None;
        }
        Some(EditorCommand::MouseScroll(notches.clamp(i32::MIN as f64, i32::MAX as f64) as i32))
    }
}
