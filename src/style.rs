//! Text attributes for drawn cells.
//!
//! The editor draws with the terminal's own colors; a cell only carries
//! [`TextAttributes`]. The gutter and status line use reverse video and
//! substitute glyphs (caret, hex, replacement) are dimmed so they read
//! differently from literal text.
//!
//! # Examples
//!
//! ```
//! use vedit::TextAttributes;
//!
//! let gutter = TextAttributes::INVERSE;
//! let combined = gutter.merge(TextAttributes::BOLD);
//! assert!(combined.contains(TextAttributes::INVERSE | TextAttributes::BOLD));
//! ```

use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    ///
    /// Attributes are represented as bitflags and can be combined using
    /// bitwise OR.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD      = 0x01;
        /// Dim/decreased intensity.
        const DIM       = 0x02;
        /// Underlined text.
        const UNDERLINE = 0x08;
        /// Swapped foreground/background.
        const INVERSE   = 0x20;
    }
}

impl TextAttributes {
    /// Attributes of the line-number gutter.
    pub const GUTTER: Self = Self::INVERSE;
    /// Attributes of the status line.
    pub const STATUS: Self = Self::INVERSE;
    /// Attributes of substitute glyphs and `~` filler rows.
    pub const SUBSTITUTE: Self = Self::DIM;

    /// Merge attributes (union of flags).
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self::from_bits_retain(self.bits() | other.bits())
    }

    /// SGR parameter codes that switch these attributes on, in code order.
    #[must_use]
    pub fn sgr_codes(self) -> Vec<&'static str> {
        let mut codes = Vec::with_capacity(4);
        if self.contains(Self::BOLD) {
            codes.push("1");
        }
        if self.contains(Self::DIM) {
            codes.push("2");
        }
        if self.contains(Self::UNDERLINE) {
            codes.push("4");
        }
        if self.contains(Self::INVERSE) {
            codes.push("7");
        }
        codes
    }
}
