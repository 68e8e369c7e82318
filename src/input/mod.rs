//! Key input decoding.
//!
//! This module turns the raw bytes a terminal sends in raw mode into
//! [`KeyEvent`]s: plain and UTF-8 characters, Ctrl combinations, and the
//! legacy VT escape sequences for cursor and editing keys.

mod keyboard;
mod parser;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
