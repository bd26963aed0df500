#![no_std]

//! # Cedi Core
//!
//! Document, cursor and viewport engine for the cedi text editor.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same command trace => same session state
//! - **Code points, not bytes**: Text is decoded once at load and encoded once at save
//! - **Mechanism over policy**: Core computes layout, hosts own windows, fonts and GPUs
//! - **No ambient authority**: File access is requested, never performed
//!
//! ## Design
//!
//! The core provides:
//! - Document: Lines with their own terminators (`\n`, `\r`, `\r\n`, `\n\r`)
//! - Cursor moves and edits that always leave a valid cursor
//! - Viewport: Cursor-follow, overscroll and smooth scroll
//! - Layout: Per-character positions shared by rendering and hit-testing
//! - EditorSession: Command in, Damage out
//! - SessionSnapshot: Deterministic state for replay testing

extern crate alloc;

mod math;

pub mod codec;
pub mod command;
pub mod cursor;
pub mod document;
pub mod edit;
pub mod glyph;
pub mod layout;
pub mod line;
pub mod options;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod viewport;

pub use codec::{decode_utf8, detect_and_skip_bom, encode_utf8, DecodeError, DecodeErrorKind, Decoded};
pub use command::{parse_command, CommandParseError, EditorCommand};
pub use cursor::{Cursor, CursorRules, Selection, VerticalMove};
pub use document::{BufferError, DecodedDocument, Document, TextChange};
pub use edit::{EditOutcome, TextDamage};
pub use glyph::{GlyphMetrics, GlyphTable, MonospaceMetrics};
pub use layout::{generate_layout, GlyphKind, Layout, LayoutLine, Rect};
pub use line::{Line, Newline};
pub use options::{EditorOptions, WhitespaceGlyphs};
pub use render::{build_frame, Color, CursorQuad, Frame, GlyphRecord, Palette};
pub use session::{CoreIoRequest, Damage, EditorSession, LoadReport};
pub use snapshot::SessionSnapshot;
pub use viewport::{RedrawMode, SmoothScroll, Viewport};
