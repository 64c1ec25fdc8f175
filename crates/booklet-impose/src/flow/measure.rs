//! Text width measurement

use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, WIDE_CHAR_WIDTH_RATIO};

/// Measures rendered text width in points.
pub trait TextMeasure {
    /// Advance width of one character at `size` points
    fn char_width(&self, ch: char, size: f32) -> f32;

    /// Width of a whole string
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch, size)).sum()
    }
}

/// Fixed-ratio metrics independent of any font.
///
/// Latin characters are half an em wide, full-width characters one em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl TextMeasure for ApproxMetrics {
    fn char_width(&self, ch: char, size: f32) -> f32 {
        if ch == '\n' {
            0.0
        } else if is_wide(ch) {
            size * WIDE_CHAR_WIDTH_RATIO
        } else {
            size * HELVETICA_CHAR_WIDTH_RATIO
        }
    }
}

/// Advance widths of the standard Helvetica font under WinAnsi encoding.
///
/// Anything outside Latin-1 is drawn as `?` and measured as one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    /// Width of `ch` in thousandths of an em
    pub fn glyph_width(ch: char) -> u16 {
        match ch as u32 {
            code @ 0x20..=0x7E => HELVETICA_ASCII[(code - 0x20) as usize],
            code @ 0xA0..=0xFF => HELVETICA_LATIN1[(code - 0xA0) as usize],
            _ => HELVETICA_ASCII[usize::from(b'?' - 0x20)],
        }
    }
}

impl TextMeasure for HelveticaMetrics {
    fn char_width(&self, ch: char, size: f32) -> f32 {
        if ch == '\n' {
            return 0.0;
        }
        f32::from(Self::glyph_width(ch)) * size / 1000.0
    }
}

/// U+0020 through U+007E
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// U+00A0 through U+00FF
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// East Asian full-width ranges (CJK, kana, hangul, full-width forms)
pub fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD)
}
