//! `vedit` - a modal terminal text editor
//!
//! The core is a text model and a layout engine: a rope-backed
//! [`TextBuffer`], a [`WrapIndex`](text::WrapIndex) that splits logical lines
//! into screen rows, and a [`Cursor`](text::Cursor) and
//! [`Viewport`](text::Viewport) addressed in those rows. The [`Editor`]
//! drives them from key events and paints frames through a [`Backend`].

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::module_name_repetitions)] // Allow Cell::CellContent etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod backend;
pub mod cell;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod input;
pub mod io;
pub mod screen;
pub mod style;
pub mod terminal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use backend::Backend;
pub use cell::{Cell, CellContent};
pub use config::EditorOptions;
pub use editor::{Command, Editor, Frame, Keymap, Mode};
pub use error::{Error, IoFailure, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback, set_log_level,
};
pub use screen::Screen;
pub use style::TextAttributes;

// Re-export input types
pub use input::{InputParser, KeyCode, KeyEvent, KeyModifiers};

// Re-export commonly used types
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
pub use text::{Cursor, Position, TextBuffer, Viewport, WrapIndex, WrapMode};
pub use unicode::{GlyphModel, WidthMethod};
