//! Fuzz target for the editor's command pipeline.
//!
//! Feeds decoded keys to an editor of arbitrary size and checks that the
//! cursor stays inside the buffer and on screen after every key.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vedit::input::InputParser;
use vedit::{Editor, EditorOptions, WrapMode};

#[derive(Debug, Arbitrary)]
struct Session {
    rows: u8,
    cols: u8,
    word_wrap: bool,
    line_numbers: bool,
    text: String,
    input: Vec<u8>,
}

fuzz_target!(|session: Session| {
    let options = EditorOptions {
        wrap_mode: if session.word_wrap { WrapMode::Word } else { WrapMode::Char },
        line_numbers: session.line_numbers,
        ..EditorOptions::default()
    };
    let rows = usize::from(session.rows % 40);
    let cols = usize::from(session.cols % 120);
    let mut editor = Editor::new(options, rows, cols).with_text(&session.text);
    let parser = InputParser::new();

    let mut remaining = session.input.as_slice();
    while let Ok((key, consumed)) = parser.parse(remaining) {
        remaining = &remaining[consumed..];
        editor.handle_key(key);

        let pos = editor.cursor();
        let buffer = editor.buffer();
        assert!(pos.line < buffer.line_count());
        assert!(pos.column <= buffer.line_len(pos.line).unwrap_or(0));
        assert!(editor.viewport().contains(editor.wrap().row_of(pos)));
        let _ = editor.render();
    }
});
