//! Session snapshot for deterministic replay testing

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct SessionSnapshot {
    /// Line texts, terminators included
    pub lines: Vec<String>,
    pub cursor: Cursor,
    pub select_cursor: Option<Cursor>,
    pub scroll: i64,
    pub draw_whitespace: bool,
    pub tab_spaces: usize,
    pub dirty: bool,
}

impl SessionSnapshot {
    /// Canonical byte encoding, stable across platforms.
    ///
    /// Feed this to a hash to compare sessions without keeping the snapshots.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.lines.len() as u64).to_le_bytes());
        for line in &self.lines {
            out.extend_from_slice(&(line.len() as u64).to_le_bytes());
            out.extend_from_slice(line.as_bytes());
        }
        push_cursor(&mut out, self.cursor);
        match self.select_cursor {
            Some(anchor) => {
                out.push(1);
                push_cursor(&mut out, anchor);
            }
            None => out.push(0),
        }
        out.extend_from_slice(&self.scroll.to_le_bytes());
        out.push(self.draw_whitespace as u8);
        out.extend_from_slice(&(self.tab_spaces as u64).to_le_bytes());
        out.push(self.dirty as u8);
        out
    }

    /// Document text as one string
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

fn push_cursor(out: &mut Vec<u8>, cursor: Cursor) {
    out.extend_from_slice(&(cursor.line as u64).to_le_bytes());
    out.extend_from_slice(&(cursor.column as u64).to_le_bytes());
}
