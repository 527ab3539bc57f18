use crate::{
    refs::{ObjectReferences, RefType},
    Pt,
};
use pdf_writer::{Name, Pdf};

/// One of the PDF standard Type 1 fonts. Standard fonts are never embedded: every
/// conforming reader ships them, so the generated invoices stay small. Text is encoded
/// with `WinAnsiEncoding`, which covers Latin-1; anything outside of it is printed
/// as a `?`.
///
/// Fonts are referred to on pages by their resource name (`/F0`, `/F1`), which is
/// derived from [Font::index].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

/// Font-wide metrics taken from the Adobe font metric files, in 1/1000 em
struct Metrics {
    base_font: &'static [u8],
    ascender: i16,
    descender: i16,
    line_gap: i16,
    /// advance widths for the printable ASCII range, ' ' through '~'
    widths: [u16; 95],
    /// width used for Latin-1 supplement characters and substitutions
    fallback_width: u16,
}

#[rustfmt::skip]
const HELVETICA: Metrics = Metrics {
    base_font: b"Helvetica",
    ascender: 718,
    descender: -207,
    line_gap: 231,
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
    fallback_width: 556,
};

#[rustfmt::skip]
const HELVETICA_BOLD: Metrics = Metrics {
    base_font: b"Helvetica-Bold",
    ascender: 718,
    descender: -207,
    line_gap: 265,
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
    fallback_width: 611,
};

impl Font {
    /// Every font a page may refer to, in resource order
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    fn metrics(&self) -> &'static Metrics {
        match self {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Position of the font in [Font::ALL], used to build its resource name
    pub fn index(&self) -> usize {
        match self {
            Font::Helvetica => 0,
            Font::HelveticaBold => 1,
        }
    }

    pub(crate) fn resource_name(&self) -> String {
        format!("F{}", self.index())
    }

    fn scaling(size: Pt) -> f32 {
        size.0 / 1000.0
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        Pt(self.metrics().ascender as f32 * Self::scaling(size))
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is negative
    pub fn descent(&self, size: Pt) -> Pt {
        Pt(self.metrics().descender as f32 * Self::scaling(size))
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let m = self.metrics();
        Pt((m.ascender + m.line_gap - m.descender) as f32 * Self::scaling(size))
    }

    /// Advance width of a single character, in 1/1000 em
    fn char_width(&self, ch: char) -> u16 {
        let m = self.metrics();
        match ch {
            ' '..='~' => m.widths[ch as usize - ' ' as usize],
            '\u{a0}'..='\u{ff}' => m.fallback_width,
            // substituted with '?'
            _ => m.widths['?' as usize - ' ' as usize],
        }
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        Pt(units as f32 * Self::scaling(size))
    }

    /// Encode text as WinAnsi bytes for a text-showing operator
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| match ch {
                ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
                '\t' => b' ',
                _ => b'?',
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Font(self.index()));
        writer
            .type1_font(id)
            .base_font(Name(self.metrics().base_font))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}
