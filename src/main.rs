//! `vedit` - modal terminal text editor
//!
//! # Usage
//!
//! ```bash
//! vedit [PATH]
//! VEDIT_WRAP=word VEDIT_TAB_WIDTH=4 vedit notes.txt
//! VEDIT_LOG=/tmp/vedit.log VEDIT_LOG_LEVEL=debug vedit src/main.rs
//! ```

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use vedit::{Editor, EditorOptions, LogLevel, Terminal, is_tty, set_log_callback, set_log_level};

const HELP_TEXT: &str = "vedit - modal terminal text editor

USAGE:
    vedit [OPTIONS] [PATH]

OPTIONS:
    -h, --help      Print this help message and exit

ENVIRONMENT:
    VEDIT_TAB_WIDTH       Columns between tab stops (default: 8)
    VEDIT_WRAP            char | word (default: char)
    VEDIT_LINE_NUMBERS    0 | 1 (default: 1)
    VEDIT_TAB_INDICATOR   Character drawn at the start of a tab
    VEDIT_WIDTH           wcwidth | unicode (default: wcwidth)
    VEDIT_LOG             Append log messages to this file
    VEDIT_LOG_LEVEL       debug | info | warn | error (default: info)

KEYS:
    Normal: h j k l, w b e, 0 ^ $, g G, i a A I o O, x, Ctrl-S, q, Q
    Insert: type text, Enter, Backspace, Tab, Esc
";

/// Result of CLI parsing.
enum Args {
    Open(Option<PathBuf>),
    Help,
    Error(String),
}

fn parse_args(args: impl IntoIterator<Item = OsString>) -> Args {
    let mut path = None;
    for arg in args.into_iter().skip(1) {
        match arg.to_str() {
            Some("-h" | "--help") => return Args::Help,
            Some(flag) if flag.starts_with('-') && flag != "-" => {
                return Args::Error(format!("unknown option '{flag}'"));
            }
            _ if path.is_some() => return Args::Error("only one file can be edited".to_string()),
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    Args::Open(path)
}

/// Route editor logs to the file named by `VEDIT_LOG`.
fn init_logging() {
    if let Some(level) = std::env::var("VEDIT_LOG_LEVEL")
        .ok()
        .and_then(|v| LogLevel::parse(&v))
    {
        set_log_level(level);
    }

    let Some(path) = std::env::var_os("VEDIT_LOG") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("vedit: cannot open log file {}: {err}", PathBuf::from(path).display());
            return;
        }
    };
    let file = Mutex::new(file);
    set_log_callback(move |level, message| {
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "[{level}] {message}");
        }
    });
}

fn run(path: Option<PathBuf>) -> vedit::Result<()> {
    let (rows, cols) = vedit::terminal_size().map_or((24, 80), |(cols, rows)| {
        (usize::from(rows), usize::from(cols))
    });
    let mut editor = Editor::new(EditorOptions::from_env(), rows, cols);
    if let Some(path) = path {
        // A failed read is shown on the status line
        let _ = editor.open(&path);
    }

    let mut terminal = Terminal::stdio();
    terminal.enter_raw_mode()?;
    terminal.enter_alt_screen()?;
    let result = editor.run(&mut terminal);
    terminal.cleanup()?;
    result
}

fn main() -> ExitCode {
    let path = match parse_args(std::env::args_os()) {
        Args::Open(path) => path,
        Args::Help => {
            print!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        Args::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    if !is_tty(&std::io::stdin()) || !is_tty(&std::io::stdout()) {
        eprintln!("vedit: standard input and output must be a terminal");
        return ExitCode::FAILURE;
    }

    init_logging();
    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vedit: {err}");
            ExitCode::FAILURE
        }
    }
}
