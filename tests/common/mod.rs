//! Shared helpers for integration tests: an in-memory backend with a
//! scripted key queue, and log setup.

#![allow(dead_code)] // Shared test helper; not every integration test uses every utility

use std::collections::VecDeque;
use std::io;
use vedit::{Backend, Cell, Error, KeyCode, KeyEvent, Screen};

/// Backend that draws into a [`Screen`] and replays queued keys.
///
/// Once the queue runs dry, `next_key_event` fails with `UnexpectedEof`, which
/// ends an [`Editor::run`](vedit::Editor::run) loop.
#[derive(Debug)]
pub struct MemoryBackend {
    drawing: Screen,
    shown: Screen,
    cursor: (usize, usize),
    shown_cursor: (usize, usize),
    keys: VecDeque<KeyEvent>,
    size: (usize, usize),
    frames: usize,
}

impl MemoryBackend {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            drawing: Screen::new(rows, cols),
            shown: Screen::new(rows, cols),
            cursor: (0, 0),
            shown_cursor: (0, 0),
            keys: VecDeque::new(),
            size: (rows, cols),
            frames: 0,
        }
    }

    /// Queue keys; plain characters become char keys.
    pub fn type_keys(&mut self, text: &str) -> &mut Self {
        self.keys.extend(text.chars().map(KeyEvent::char));
        self
    }

    pub fn press(&mut self, code: KeyCode) -> &mut Self {
        self.keys.push_back(KeyEvent::key(code));
        self
    }

    pub fn push(&mut self, key: KeyEvent) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// Change the reported size; the next frame is drawn at the new size.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.size = (rows, cols);
        self.drawing.resize(rows, cols);
    }

    /// Text of the last shown frame, trailing blanks trimmed.
    pub fn lines(&self) -> Vec<String> {
        self.shown.lines()
    }

    pub fn screen(&self) -> &Screen {
        &self.shown
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.shown_cursor
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Backend for MemoryBackend {
    fn next_key_event(&mut self) -> vedit::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| Error::Terminal(io::ErrorKind::UnexpectedEof.into()))
    }

    fn draw_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.drawing.put(row, col, cell);
    }

    fn place_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }

    fn refresh(&mut self) -> vedit::Result<()> {
        self.shown = self.drawing.clone();
        self.shown_cursor = self.cursor;
        self.drawing.clear();
        self.frames += 1;
        Ok(())
    }

    fn terminal_size(&mut self) -> vedit::Result<(usize, usize)> {
        Ok(self.size)
    }
}

/// Route test diagnostics through tracing and mirror editor logs into it.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
    vedit::set_log_level(vedit::LogLevel::Debug);
    vedit::set_log_callback(|level, message| match level {
        vedit::LogLevel::Debug => tracing::debug!(target: "vedit", "{message}"),
        vedit::LogLevel::Info => tracing::info!(target: "vedit", "{message}"),
        vedit::LogLevel::Warn => tracing::warn!(target: "vedit", "{message}"),
        vedit::LogLevel::Error => tracing::error!(target: "vedit", "{message}"),
    });
}
