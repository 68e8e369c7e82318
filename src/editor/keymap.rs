//! Per-mode key dispatch tables.

use crate::input::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;

/// Editing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

impl Mode {
    /// Upper-case name shown in the status line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One editor action, applied as a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    LineStart,
    FirstNonBlank,
    LineEnd,
    WordForward,
    WordBack,
    WordEnd,
    DocumentStart,
    DocumentEnd,
    PageDown,
    PageUp,
    /// `i`: Insert before the cursor.
    InsertBefore,
    /// `a`: Insert after the cursor.
    Append,
    /// `A`: Insert at the end of the line.
    AppendLineEnd,
    /// `I`: Insert before the first non-blank.
    InsertLineStart,
    OpenBelow,
    OpenAbove,
    ExitInsert,
    InsertChar(char),
    NewLine,
    /// Delete before the cursor, joining lines at column 0.
    Backspace,
    /// Delete under the cursor, joining the next line at the line end.
    DeleteChar,
    Save,
    /// Quit unless there are unsaved changes.
    Quit,
    /// Quit discarding changes.
    ForceQuit,
}

/// Key to command tables for each mode.
///
/// Insert mode falls back to [`Command::InsertChar`] for keys that type a
/// character.
#[derive(Clone, Debug)]
pub struct Keymap {
    normal: HashMap<KeyEvent, Command>,
    insert: HashMap<KeyEvent, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

fn ch(c: char) -> KeyEvent {
    KeyEvent::char(c)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::key(code)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::with_ctrl(KeyCode::Char(c))
}

impl Keymap {
    /// The built-in vim-like bindings.
    #[must_use]
    pub fn new() -> Self {
        // Keys shared by both modes
        let common = [
            (key(KeyCode::Left), Command::MoveLeft),
            (key(KeyCode::Right), Command::MoveRight),
            (key(KeyCode::Up), Command::MoveUp),
            (key(KeyCode::Down), Command::MoveDown),
            (key(KeyCode::Home), Command::LineStart),
            (key(KeyCode::End), Command::LineEnd),
            (key(KeyCode::PageDown), Command::PageDown),
            (key(KeyCode::PageUp), Command::PageUp),
            (key(KeyCode::Delete), Command::DeleteChar),
            (ctrl('s'), Command::Save),
        ];

        let mut normal: HashMap<KeyEvent, Command> = common.into_iter().collect();
        normal.extend([
            (ch('h'), Command::MoveLeft),
            (key(KeyCode::Backspace), Command::MoveLeft),
            (ch('l'), Command::MoveRight),
            (ch(' '), Command::MoveRight),
            (ch('k'), Command::MoveUp),
            (ch('j'), Command::MoveDown),
            (ch('0'), Command::LineStart),
            (ch('^'), Command::FirstNonBlank),
            (ch('$'), Command::LineEnd),
            (ch('w'), Command::WordForward),
            (ch('b'), Command::WordBack),
            (ch('e'), Command::WordEnd),
            (ch('g'), Command::DocumentStart),
            (ch('G'), Command::DocumentEnd),
            (ctrl('f'), Command::PageDown),
            (ctrl('b'), Command::PageUp),
            (ch('i'), Command::InsertBefore),
            (key(KeyCode::Insert), Command::InsertBefore),
            (ch('a'), Command::Append),
            (ch('A'), Command::AppendLineEnd),
            (ch('I'), Command::InsertLineStart),
            (ch('o'), Command::OpenBelow),
            (ch('O'), Command::OpenAbove),
            (ch('x'), Command::DeleteChar),
            (ch('q'), Command::Quit),
            (ch('Q'), Command::ForceQuit),
        ]);

        let mut insert: HashMap<KeyEvent, Command> = common.into_iter().collect();
        insert.extend([
            (key(KeyCode::Esc), Command::ExitInsert),
            (key(KeyCode::Enter), Command::NewLine),
            (key(KeyCode::Backspace), Command::Backspace),
            (key(KeyCode::Tab), Command::InsertChar('\t')),
        ]);

        Self { normal, insert }
    }

    /// Command bound to `key` in `mode`.
    #[must_use]
    pub fn lookup(&self, mode: Mode, key: KeyEvent) -> Option<Command> {
        match mode {
            Mode::Normal => self.normal.get(&normalize(key)).copied(),
            Mode::Insert => self
                .insert
                .get(&normalize(key))
                .copied()
                .or_else(|| key.typed_char().map(Command::InsertChar)),
        }
    }

    /// Bind `key` to `command` in `mode`, replacing any existing binding.
    pub fn bind(&mut self, mode: Mode, key: KeyEvent, command: Command) {
        let table = match mode {
            Mode::Normal => &mut self.normal,
            Mode::Insert => &mut self.insert,
        };
        table.insert(normalize(key), command);
    }
}

/// Drop Shift from character keys; the character already reflects it.
fn normalize(key: KeyEvent) -> KeyEvent {
    if key.code.is_char() {
        KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT)
    } else {
        key
    }
}
