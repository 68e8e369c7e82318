//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::style::TextAttributes;
use std::io::{self, Write};

/// Write a u32 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    // Fast paths for common small values (most cursor positions)
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Write an SGR sequence built from parameter codes; nothing for no codes.
pub fn write_sgr(w: &mut impl Write, codes: &[&str]) -> io::Result<()> {
    if codes.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            w.write_all(b";")?;
        }
        w.write_all(code.as_bytes())?;
    }
    w.write_all(b"m")
}

/// Write SGR sequence that switches `attrs` on.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    write_sgr(w, &attrs.sgr_codes())
}

/// Write SGR sequence that switches `removed` off.
pub fn write_attributes_off(w: &mut impl Write, removed: TextAttributes) -> io::Result<()> {
    let mut codes = Vec::with_capacity(3);
    if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
        codes.push(attr::RESET_INTENSITY);
    }
    if removed.contains(TextAttributes::UNDERLINE) {
        codes.push(attr::RESET_UNDERLINE);
    }
    if removed.contains(TextAttributes::INVERSE) {
        codes.push(attr::RESET_INVERSE);
    }
    write_sgr(w, &codes)
}

/// Write absolute cursor position sequence (0-indexed input, 1-indexed output).
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Write relative cursor movement to a writer.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    if dy < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"A")?;
    } else if dy > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"B")?;
    }

    if dx > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"C")?;
    } else if dx < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"D")?;
    }
    Ok(())
}
