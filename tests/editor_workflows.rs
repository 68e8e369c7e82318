//! End-to-end editing workflows driven through key events.
//!
//! Run with:
//!   cargo test --test editor_workflows -- --nocapture

mod common;

use common::{MemoryBackend, init_logging};
use tracing::{debug, info};
use vedit::text::WrapRow;
use vedit::{
    Cell, Editor, EditorOptions, Error, KeyCode, KeyEvent, Mode, Position, WidthMethod, WrapMode,
};

fn editor(text: &str, rows: usize, cols: usize) -> Editor {
    Editor::new(EditorOptions::default(), rows, cols).with_text(text)
}

fn bare_editor(text: &str, rows: usize, cols: usize) -> Editor {
    let options = EditorOptions {
        line_numbers: false,
        ..EditorOptions::default()
    };
    Editor::new(options, rows, cols).with_text(text)
}

fn keys(editor: &mut Editor, keys: &str) {
    for ch in keys.chars() {
        editor.handle_key(KeyEvent::char(ch));
    }
}

fn press(editor: &mut Editor, code: KeyCode) {
    editor.handle_key(KeyEvent::key(code));
}

fn spans(editor: &Editor) -> Vec<(usize, usize, usize)> {
    let wrap = editor.wrap();
    wrap.rows(0..wrap.row_count())
        .map(|row: WrapRow| (row.line, row.start, row.end))
        .collect()
}

#[test]
fn insert_updates_only_the_edited_line() {
    init_logging();
    // 80 text columns after the 4-column gutter
    let mut ed = editor("abc\nde", 10, 84);
    assert_eq!(ed.wrap().width(), 80);
    assert_eq!(spans(&ed), vec![(0, 0, 3), (1, 0, 2)]);

    keys(&mut ed, "liX");
    assert_eq!(ed.buffer().text(), "aXbc\nde");
    assert_eq!(spans(&ed), vec![(0, 0, 4), (1, 0, 2)]);
    assert_eq!(ed.cursor(), Position::new(0, 2));
}

#[test]
fn narrow_viewport_wraps_by_character() {
    let ed = bare_editor("abcdef", 5, 3);
    assert_eq!(ed.wrap().width(), 3);
    assert_eq!(spans(&ed), vec![(0, 0, 3), (0, 3, 6)]);
}

#[test]
fn backspace_at_line_start_joins_lines() {
    let mut ed = editor("ab\ncd", 5, 20);
    keys(&mut ed, "ji");
    press(&mut ed, KeyCode::Backspace);
    assert_eq!(ed.buffer().text(), "abcd");
    assert_eq!(ed.cursor(), Position::new(0, 2));
    assert_eq!(spans(&ed), vec![(0, 0, 4)]);
}

#[test]
fn backspace_at_document_start_is_a_no_op() {
    let mut ed = editor("ab", 5, 20);
    keys(&mut ed, "i");
    press(&mut ed, KeyCode::Backspace);
    assert_eq!(ed.buffer().text(), "ab");
    assert!(!ed.buffer().is_modified());
}

#[test]
fn vertical_moves_remember_the_target_column() {
    let mut ed = editor("0123456789\nab\n0123456789", 10, 40);
    keys(&mut ed, "lllll");
    assert_eq!(ed.cursor(), Position::new(0, 5));

    keys(&mut ed, "j");
    assert_eq!(ed.cursor(), Position::new(1, 2));
    keys(&mut ed, "j");
    assert_eq!(ed.cursor(), Position::new(2, 5));
    keys(&mut ed, "kk");
    assert_eq!(ed.cursor(), Position::new(0, 5));
}

#[test]
fn vertical_moves_follow_wrapped_rows() {
    let mut ed = bare_editor("abcdefgh\nxy", 10, 4);
    keys(&mut ed, "l");
    keys(&mut ed, "j");
    // Second row of the first line
    assert_eq!(ed.cursor(), Position::new(0, 5));
    keys(&mut ed, "j");
    assert_eq!(ed.cursor(), Position::new(1, 1));
}

#[test]
fn wide_glyphs_are_never_split() {
    let ed = bare_editor("日本語", 5, 5);
    assert_eq!(spans(&ed), vec![(0, 0, 2), (0, 2, 3)]);
    let frame = ed.render();
    assert_eq!(frame.lines()[0], "日本");
    assert_eq!(frame.lines()[1], "語");
}

#[test]
fn ambiguous_glyphs_follow_the_width_method() {
    let options = EditorOptions {
        line_numbers: false,
        width_method: WidthMethod::Unicode,
        ..EditorOptions::default()
    };
    let ed = Editor::new(options, 5, 10).with_text("①x");
    let mut backend = MemoryBackend::new(5, 10);
    ed.paint(&mut backend).unwrap();

    let screen = backend.screen();
    assert_eq!(screen.get(0, 0).map(Cell::display_width), Some(2));
    assert!(screen.get(0, 1).is_some_and(Cell::is_continuation));
    assert_eq!(screen.get(0, 2).map(Cell::symbol), Some('x'));
    assert_eq!(backend.lines()[0], "①x");
}

#[test]
fn word_wrap_breaks_after_whitespace() {
    let options = EditorOptions {
        line_numbers: false,
        wrap_mode: WrapMode::Word,
        ..EditorOptions::default()
    };
    let ed = Editor::new(options, 5, 8).with_text("hello big world");
    let lines = ed.render().lines();
    assert_eq!(lines[0], "hello");
    assert_eq!(lines[1], "big");
    assert_eq!(lines[2], "world");
}

#[test]
fn tabs_expand_to_the_next_stop() {
    let options = EditorOptions {
        line_numbers: false,
        tab_width: 4,
        ..EditorOptions::default()
    };
    let mut ed = Editor::new(options, 5, 20).with_text("\tx");
    assert_eq!(ed.render().lines()[0], "    x");
    keys(&mut ed, "l");
    assert_eq!(ed.render().cursor, (0, 4));
}

#[test]
fn save_writes_edits_back() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "one\ntwo\n").unwrap();

    let mut ed = editor("", 10, 40);
    ed.open(&path).unwrap();
    assert_eq!(ed.buffer().line_count(), 3);
    assert_eq!(ed.path(), Some(path.as_path()));
    info!(status = ed.message(), "opened");

    keys(&mut ed, "A!");
    press(&mut ed, KeyCode::Esc);
    assert!(ed.buffer().is_modified());

    ed.handle_key(KeyEvent::with_ctrl(KeyCode::Char('s')));
    assert!(!ed.buffer().is_modified());
    assert!(ed.message().ends_with("3L, 9B written"), "{}", ed.message());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one!\ntwo\n");
}

#[test]
fn latin1_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin.txt");
    std::fs::write(&path, b"caf\xe9\n").unwrap();

    let mut ed = editor("", 10, 40);
    ed.open(&path).unwrap();
    assert_eq!(ed.buffer().line_text(0).unwrap(), "café");
    assert!(ed.message().contains("latin-1"));

    ed.save().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"caf\xe9\n");
}

#[test]
fn missing_file_opens_empty_and_is_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");

    let mut ed = editor("stale", 10, 40);
    ed.open(&path).unwrap();
    assert_eq!(ed.buffer().text(), "");
    assert!(ed.message().contains("New File"));

    keys(&mut ed, "ihi");
    ed.save().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi");
}

#[test]
fn failed_save_keeps_the_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("file.txt");

    let mut ed = editor("", 10, 40);
    ed.open(&path).unwrap();
    keys(&mut ed, "ix");
    let err = ed.save().unwrap_err();
    debug!(%err, "save failed");
    assert!(matches!(err, Error::Io { .. }));
    assert!(ed.message().starts_with("Failed to write file '"));
    assert!(ed.buffer().is_modified());
    assert_eq!(ed.buffer().text(), "x");
}

#[test]
fn save_without_a_path_reports_it() {
    let mut ed = editor("text", 10, 40);
    ed.handle_key(KeyEvent::with_ctrl(KeyCode::Char('s')));
    assert_eq!(ed.message(), "Can't write file without filename.");
    assert!(!ed.should_quit());
}

#[test]
fn quit_needs_force_after_edits() {
    let mut ed = editor("text", 10, 40);
    keys(&mut ed, "x");
    keys(&mut ed, "q");
    assert!(!ed.should_quit());
    assert!(ed.render().status.contains("No write since last change"));
    keys(&mut ed, "Q");
    assert!(ed.should_quit());
}

#[test]
fn run_loop_paints_every_key() {
    init_logging();
    let mut ed = editor("", 5, 20);
    let mut backend = MemoryBackend::new(5, 20);
    backend.type_keys("ihello").press(KeyCode::Esc).type_keys("Q");

    ed.run(&mut backend).unwrap();
    assert!(ed.should_quit());
    assert_eq!(backend.frames(), 9);
    assert_eq!(backend.lines()[0], "  1 hello");
    assert_eq!(backend.lines()[1], "~");
    assert!(backend.lines()[4].starts_with("NORMAL"));
    assert!(backend.lines()[4].ends_with("LN 1:5"));
    assert_eq!(backend.cursor(), (0, 8));
}

#[test]
fn run_loop_ends_when_input_ends() {
    let mut ed = editor("abc", 5, 20);
    let mut backend = MemoryBackend::new(5, 20);
    backend.type_keys("ll");
    let err = ed.run(&mut backend).unwrap_err();
    assert!(matches!(err, Error::Terminal(_)));
    assert_eq!(ed.cursor(), Position::new(0, 2));
    assert_eq!(backend.pending_keys(), 0);
}

#[test]
fn run_loop_follows_terminal_resizes() {
    let mut ed = editor("abcdefgh", 5, 8);
    let mut backend = MemoryBackend::new(5, 8);
    backend.resize(5, 12);
    backend.type_keys("Q");
    ed.run(&mut backend).unwrap();
    assert_eq!(ed.wrap().row_count(), 1);
    assert_eq!(backend.lines()[0], "  1 abcdefgh");
}

#[test]
fn paging_keeps_cursor_visible() {
    let text = (1..=50).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
    let mut ed = editor(&text, 11, 30);
    ed.handle_key(KeyEvent::with_ctrl(KeyCode::Char('f')));
    let top = ed.viewport().top();
    assert!(top > 0);
    let row = ed.wrap().row_of(ed.cursor());
    assert!(ed.viewport().contains(row));

    ed.handle_key(KeyEvent::with_ctrl(KeyCode::Char('b')));
    assert_eq!(ed.viewport().top(), 0);
    let row = ed.wrap().row_of(ed.cursor());
    assert!(ed.viewport().contains(row));
}

#[test]
fn mode_switches_show_on_the_status_line() {
    let mut ed = editor("", 4, 30);
    keys(&mut ed, "i");
    assert_eq!(ed.mode(), Mode::Insert);
    assert!(ed.render().status.starts_with("INSERT"));
    press(&mut ed, KeyCode::Esc);
    assert!(ed.render().status.starts_with("NORMAL"));
}

#[test]
fn independent_editors_do_not_share_state() {
    let mut a = editor("aaa", 5, 20);
    let b = editor("bbb", 5, 20);
    keys(&mut a, "x");
    assert_eq!(a.buffer().text(), "aa");
    assert_eq!(b.buffer().text(), "bbb");
}

#[test]
fn custom_bindings_replace_defaults() {
    let mut keymap = vedit::Keymap::new();
    keymap.bind(Mode::Normal, KeyEvent::char('q'), vedit::Command::ForceQuit);
    keymap.bind(Mode::Insert, KeyEvent::with_ctrl(KeyCode::Char('c')), vedit::Command::ExitInsert);
    let mut ed = editor("text", 5, 20).with_keymap(keymap);

    keys(&mut ed, "ix");
    ed.handle_key(KeyEvent::with_ctrl(KeyCode::Char('c')));
    assert_eq!(ed.mode(), Mode::Normal);
    keys(&mut ed, "q");
    assert!(ed.should_quit());
}
