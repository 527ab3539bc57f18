//! Positioning of invoice content on pages.
//!
//! Layout turns a validated [InvoiceRequest](crate::invoice::InvoiceRequest) into an
//! ordered list of [DrawCommand]s in a single top-to-bottom pass. A [LayoutCursor]
//! tracks the vertical writing position and inserts [DrawCommand::PageBreak] whenever
//! the next line, table row or image would cross the bottom margin.
//!
//! Coordinates are in points from the top-left corner of the page; converting them
//! to PDF space is left to [render](crate::render()).
//!
//! # Example
//!
//! ```
//! use invoice_gen::layout::{wrap_text, Margins};
//! use invoice_gen::{Font, Pt, SpanFont};
//!
//! let font = SpanFont { font: Font::Helvetica, size: Pt(12.0) };
//! let lines = wrap_text("Stainless steel widget, boxed", &font, Pt(100.0));
//! assert_eq!(lines, vec!["Stainless steel", "widget, boxed"]);
//!
//! let margins = Margins::all(Pt(72.0));
//! assert_eq!(margins.left, Pt(72.0));
//! ```

mod command;
mod cursor;
mod invoice;
mod margins;
mod text;

pub use command::*;
pub use cursor::*;
pub use invoice::*;
pub use margins::*;
pub use text::*;
