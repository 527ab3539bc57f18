//! Pre-defined page sizes for the paper formats invoices are printed on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.

use crate::units::*;
use serde::Deserialize;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a4 (converted from mm to points); smaller a-series sheets can't hold the item table
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// A page size selectable by name from configuration
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    #[default]
    Letter,
    Legal,
    A4,
}

impl PaperFormat {
    pub fn size(self) -> PageSize {
        match self {
            PaperFormat::Letter => LETTER,
            PaperFormat::Legal => LEGAL,
            PaperFormat::A4 => A4,
        }
    }
}
