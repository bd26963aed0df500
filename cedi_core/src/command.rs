//! Editor commands and their text form

use alloc::string::String;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Everything the session can be asked to do
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum EditorCommand {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Wheel notches, negative toward the top
    MouseScroll(i32),
    InsertChar(char),
    InsertTab,
    InsertNewline,
    /// Backspace
    DeletePrev,
    /// Forward delete
    DeleteNext,
    OpenFile(String),
    ToggleDrawWhitespace,
    SetTabWidth(usize),
    AdjustTabWidth(i32),
    StartSelection,
    CancelSelection,
    Resize { width: f32, height: f32 },
}

impl EditorCommand {
    /// Whether the command may change document text
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditorCommand::InsertChar(_)
                | EditorCommand::InsertTab
                | EditorCommand::InsertNewline
                | EditorCommand::DeletePrev
                | EditorCommand::DeleteNext
        )
    }
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    Unknown(String),
    MissingArgument(&'static str),
    InvalidArgument(String),
}

impl core::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandParseError::Unknown(name) => write!(f, "Unknown command: {}", name),
            CommandParseError::MissingArgument(name) => write!(f, "Missing argument for {}", name),
            CommandParseError::InvalidArgument(arg) => write!(f, "Invalid argument: {}", arg),
        }
    }
}

/// Parse one command in its text form, e.g. `down`, `insert x`, `tabwidth +1`
pub fn parse_command(input: &str) -> Result<EditorCommand, CommandParseError> {
    let trimmed = input.trim();
    let (name, arg) = match trimmed.split_once(' ') {
        Some((name, arg)) => (name, Some(arg)),
        None => (trimmed, None),
    };

    let command = match name {
        "left" => EditorCommand::MoveLeft,
        "right" => EditorCommand::MoveRight,
        "up" => EditorCommand::MoveUp,
        "down" => EditorCommand::MoveDown,
        "pageup" => EditorCommand::PageUp,
        "pagedown" => EditorCommand::PageDown,
        "scroll" => EditorCommand::MouseScroll(parse_number(arg, "scroll")?),
        "insert" => {
            let arg = arg.ok_or(CommandParseError::MissingArgument("insert"))?;
            let mut chars = arg.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => EditorCommand::InsertChar(ch),
                _ => return Err(CommandParseError::InvalidArgument(arg.into())),
            }
        }
        "space" => EditorCommand::InsertChar(' '),
        "tab" => EditorCommand::InsertTab,
        "newline" => EditorCommand::InsertNewline,
        "backspace" => EditorCommand::DeletePrev,
        "delete" => EditorCommand::DeleteNext,
        "open" => {
            let path = arg.map(str::trim).filter(|path| !path.is_empty());
            EditorCommand::OpenFile(path.ok_or(CommandParseError::MissingArgument("open"))?.into())
        }
        "whitespace" => EditorCommand::ToggleDrawWhitespace,
        "tabwidth" => {
            let arg = arg.ok_or(CommandParseError::MissingArgument("tabwidth"))?.trim();
            if arg.starts_with('+') || arg.starts_with('-') {
                EditorCommand::AdjustTabWidth(parse_number(Some(arg), "tabwidth")?)
            } else {
                EditorCommand::SetTabWidth(parse_number(Some(arg), "tabwidth")?)
            }
        }
        "select" => EditorCommand::StartSelection,
        "deselect" => EditorCommand::CancelSelection,
        "resize" => {
            let arg = arg.ok_or(CommandParseError::MissingArgument("resize"))?;
            let (width, height) = arg
                .trim()
                .split_once(' ')
                .ok_or_else(|| CommandParseError::InvalidArgument(arg.into()))?;
            EditorCommand::Resize {
                width: parse_number(Some(width), "resize")?,
                height: parse_number(Some(height), "resize")?,
            }
        }
        _ => return Err(CommandParseError::Unknown(trimmed.into())),
    };
    Ok(command)
}

fn parse_number<T: core::str::FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandParseError> {
    let arg = arg.ok_or(CommandParseError::MissingArgument(name))?.trim();
    let arg = arg.strip_prefix('+').unwrap_or(arg);
    arg.parse()
        .map_err(|_| CommandParseError::InvalidArgument(arg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("down"), Ok(EditorCommand::MoveDown));
        assert_eq!(parse_command("  pageup "), Ok(EditorCommand::PageUp));
        assert_eq!(parse_command("scroll -5"), Ok(EditorCommand::MouseScroll(-5)));
    }

    #[test]
    fn test_parse_insert() {
        assert_eq!(parse_command("insert X"), Ok(EditorCommand::InsertChar('X')));
        assert_eq!(parse_command("insert ß"), Ok(EditorCommand::InsertChar('ß')));
        assert_eq!(parse_command("space"), Ok(EditorCommand::InsertChar(' ')));
        assert_eq!(
            parse_command("insert ab"),
            Err(CommandParseError::InvalidArgument("ab".into()))
        );
        assert_eq!(
            parse_command("insert"),
            Err(CommandParseError::MissingArgument("insert"))
        );
    }

    #[test]
    fn test_parse_tab_width() {
        assert_eq!(parse_command("tabwidth 8"), Ok(EditorCommand::SetTabWidth(8)));
        assert_eq!(parse_command("tabwidth +1"), Ok(EditorCommand::AdjustTabWidth(1)));
        assert_eq!(parse_command("tabwidth -1"), Ok(EditorCommand::AdjustTabWidth(-1)));
    }

    #[test]
    fn test_parse_open_and_resize() {
        assert_eq!(
            parse_command("open notes.txt"),
            Ok(EditorCommand::OpenFile("notes.txt".into()))
        );
        assert_eq!(
            parse_command("resize 800 600"),
            Ok(EditorCommand::Resize {
                width: 800.0,
                height: 600.0
            })
        );
        assert_eq!(parse_command("open"), Err(CommandParseError::MissingArgument("open")));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandParseError::Unknown("frobnicate".into()))
        );
    }

    #[test]
    fn test_is_edit() {
        assert!(EditorCommand::DeletePrev.is_edit());
        assert!(!EditorCommand::PageDown.is_edit());
    }
}
