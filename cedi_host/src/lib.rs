//! # Cedi Host
//!
//! Host side of the cedi editor: everything the core deliberately does not do.
//!
//! ## Philosophy
//!
//! - **Core stays pure**: The session never reads files, clocks or devices
//! - **Requests, not callbacks**: `OpenFile` comes back as a request the host fulfils
//! - **Redraw on damage**: Wait for events unless the session asks for continuous frames
//! - **Testable**: File access and time are traits with in-memory stand-ins
//!
//! ## Non-Goals
//!
//! - Windowing, GPU upload and font rasterisation
//! - Undo, search, clipboard
//!
//! ## Design
//!
//! - `io`: `DocumentIo` for reading and writing whole files
//! - `keymap`: key, text and wheel events to `EditorCommand`
//! - `frame`: `FramePacer` choosing wait vs poll and measuring frame time
//! - `render`: console rendering of a session
//! - `editor`: `Editor` facade tying them to one `EditorSession`

pub mod editor;
pub mod frame;
pub mod io;
pub mod keymap;
pub mod render;

pub use editor::{Editor, EditorError, EditorResult, DEFAULT_VIEWPORT};
pub use frame::{Clock, FramePacer, FrameStats, MonotonicClock, WaitMode};
pub use io::{DocumentIo, FsDocumentIo, IoError, MemoryDocumentIo};
pub use keymap::{KeyAction, KeyCode, KeyEvent, KeyMapper, Modifiers};
pub use render::{StatusInfo, TextView};
