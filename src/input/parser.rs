//! ANSI sequence parser for terminal key input.
//!
//! Parses raw bytes from the terminal into [`KeyEvent`]s. Supports:
//! - ASCII, UTF-8 and C0 control keys (Ctrl+letter, Enter, Tab, Backspace)
//! - CSI sequences with modifiers (arrows, Home/End, tilde keys)
//! - SS3 sequences (application-mode arrows, F1-F4)
//! - Alt+key as an ESC prefix

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
// Self is used for consistency with other methods even when not needed
#![allow(clippy::unused_self)]

use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence; the bytes are consumed and skipped.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input; one byte is skipped.
    InvalidUtf8,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no input"),
            Self::Incomplete => write!(f, "incomplete escape sequence"),
            Self::UnrecognizedSequence(bytes) => {
                write!(f, "unrecognized sequence {:?}", String::from_utf8_lossy(bytes))
            }
            Self::InvalidUtf8 => write!(f, "invalid UTF-8 input"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Result of parsing input.
pub type ParseResult = Result<(KeyEvent, usize), ParseError>;

/// Stateless key decoder.
#[derive(Clone, Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse bytes into a key event.
    ///
    /// Returns the event and number of bytes consumed, or an error.
    /// Call repeatedly with the remaining buffer until
    /// `Err(ParseError::Empty)` or `Err(ParseError::Incomplete)` is returned.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        match first {
            0x1b => self.parse_escape(input),
            0x00 => Ok((KeyEvent::key(KeyCode::Null), 1)),
            0x08 | 0x7f => Ok((KeyEvent::key(KeyCode::Backspace), 1)),
            b'\t' => Ok((KeyEvent::key(KeyCode::Tab), 1)),
            b'\r' | b'\n' => Ok((KeyEvent::key(KeyCode::Enter), 1)),
            0x01..=0x1a => {
                // Ctrl+A through Ctrl+Z
                let c = (first - 1 + b'a') as char;
                Ok((KeyEvent::with_ctrl(KeyCode::Char(c)), 1))
            }
            0x1c..=0x1f => {
                let c = (first + 0x40) as char;
                Ok((KeyEvent::with_ctrl(KeyCode::Char(c)), 1))
            }
            0x20..=0x7e => Ok((KeyEvent::char(first as char), 1)),
            0x80..=0xff => self.parse_utf8(input),
        }
    }

    /// Resolve a sequence that stayed incomplete after the input went quiet.
    ///
    /// A lone ESC (or an ESC followed by a truncated sequence) is the Escape
    /// key; the ESC byte alone is consumed.
    #[must_use]
    pub fn parse_stalled(&self, input: &[u8]) -> Option<(KeyEvent, usize)> {
        match input.first() {
            Some(0x1b) => Some((KeyEvent::key(KeyCode::Esc), 1)),
            _ => None,
        }
    }

    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        if input.len() == 1 {
            // Could be just Escape or start of sequence
            return Err(ParseError::Incomplete);
        }

        match input[1] {
            b'[' => self.parse_csi(input),
            b'O' => self.parse_ss3(input),
            // Alt+key: ESC <char>
            0x20..=0x7e => {
                let c = input[1] as char;
                Ok((KeyEvent::with_alt(KeyCode::Char(c)), 2))
            }
            _ => Ok((KeyEvent::key(KeyCode::Esc), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        // Find the final byte (0x40-0x7e)
        let Some(end) = (2..input.len()).find(|&i| (0x40..=0x7e).contains(&input[i])) else {
            return Err(ParseError::Incomplete);
        };

        let params = &input[2..end];
        let consumed = end + 1;

        match input[end] {
            b'A' => self.parse_modified_key(params, KeyCode::Up, consumed),
            b'B' => self.parse_modified_key(params, KeyCode::Down, consumed),
            b'C' => self.parse_modified_key(params, KeyCode::Right, consumed),
            b'D' => self.parse_modified_key(params, KeyCode::Left, consumed),
            b'H' => self.parse_modified_key(params, KeyCode::Home, consumed),
            b'F' => self.parse_modified_key(params, KeyCode::End, consumed),
            b'Z' => Ok((KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), consumed)),
            b'~' => self.parse_tilde_key(params, consumed),
            _ => Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        }
    }

    fn parse_modified_key(&self, params: &[u8], base_key: KeyCode, consumed: usize) -> ParseResult {
        let modifiers = self.parse_modifiers(params)?;
        Ok((KeyEvent::new(base_key, modifiers), consumed))
    }

    /// Parse modifiers from CSI parameter bytes.
    ///
    /// Format `1;N` where N = 1 + (shift ? 1 : 0) + (alt ? 2 : 0) + (ctrl ? 4 : 0).
    fn parse_modifiers(&self, params: &[u8]) -> Result<KeyModifiers, ParseError> {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let Some(n) = s.split(';').nth(1).and_then(|p| p.parse::<u8>().ok()) else {
            return Ok(KeyModifiers::empty());
        };
        let n = n.saturating_sub(1);
        let mut mods = KeyModifiers::empty();
        if n & 1 != 0 {
            mods |= KeyModifiers::SHIFT;
        }
        if n & 2 != 0 {
            mods |= KeyModifiers::ALT;
        }
        if n & 4 != 0 {
            mods |= KeyModifiers::CTRL;
        }
        Ok(mods)
    }

    /// Parse tilde key sequences (Insert, Delete, Page Up/Down, F5+).
    fn parse_tilde_key(&self, params: &[u8], consumed: usize) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let num: u8 = s
            .split(';')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let modifiers = self.parse_modifiers(params)?;

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17..=21 => KeyCode::F(num - 11),
            23 | 24 => KeyCode::F(num - 12),
            _ => {
                let mut seq = b"\x1b[".to_vec();
                seq.extend_from_slice(params);
                seq.push(b'~');
                return Err(ParseError::UnrecognizedSequence(seq));
            }
        };

        Ok((KeyEvent::new(code, modifiers), consumed))
    }

    /// Parse SS3 sequences (ESC O ...).
    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        let code = match input[2] {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };

        Ok((KeyEvent::key(code), 3))
    }

    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];

        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;

        Ok((KeyEvent::char(c), expected_len))
    }
}
