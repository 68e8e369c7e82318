//! Editor events and logs reach the installed callbacks.
//!
//! Kept in its own test binary: the callbacks are process-wide.

use std::sync::{Arc, Mutex};
use vedit::{Editor, EditorOptions, KeyCode, KeyEvent, LogLevel};

#[test]
fn editor_reports_mode_open_and_save() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let logs = Arc::new(Mutex::new(Vec::new()));
    {
        let events = Arc::clone(&events);
        vedit::set_event_callback(move |name, data| {
            events.lock().unwrap().push((name.to_string(), data.to_string()));
        });
        let logs = Arc::clone(&logs);
        vedit::set_log_callback(move |level, message| {
            logs.lock().unwrap().push((level, message.to_string()));
        });
    }
    vedit::set_log_level(LogLevel::Debug);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.txt");
    let mut editor = Editor::new(EditorOptions::default(), 10, 40);
    editor.open(&path).unwrap();
    editor.handle_key(KeyEvent::char('i'));
    editor.handle_key(KeyEvent::char('x'));
    editor.handle_key(KeyEvent::key(KeyCode::Esc));
    editor.save().unwrap();

    let names: Vec<String> = events.lock().unwrap().iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(names, vec!["open", "mode", "mode", "save"]);
    assert_eq!(events.lock().unwrap()[1].1, "INSERT");

    let logs = logs.lock().unwrap();
    assert!(logs.iter().any(|(level, msg)| *level == LogLevel::Debug && msg.contains("mode")));
    assert!(logs.iter().any(|(_, msg)| msg.starts_with("saved")));

    vedit::clear_event_callback();
    vedit::clear_log_callback();
}
