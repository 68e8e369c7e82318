//! Fuzz target for the key input parser.
//!
//! Arbitrary terminal bytes must decode without panicking, and every
//! successful parse must consume at least one byte of the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vedit::input::{InputParser, ParseError};

fuzz_target!(|data: &[u8]| {
    let parser = InputParser::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        match parser.parse(remaining) {
            Ok((_key, consumed)) => {
                assert!(consumed > 0 && consumed <= remaining.len());
                remaining = &remaining[consumed..];
            }
            Err(ParseError::Empty) => break,
            Err(ParseError::Incomplete) => {
                // A stalled read turns a pending ESC into a key; anything else waits
                match parser.parse_stalled(remaining) {
                    Some((_key, consumed)) => remaining = &remaining[consumed..],
                    None => break,
                }
            }
            Err(ParseError::UnrecognizedSequence(seq)) => {
                let skip = seq.len().clamp(1, remaining.len());
                remaining = &remaining[skip..];
            }
            Err(ParseError::InvalidUtf8) => remaining = &remaining[1..],
        }
    }
});
