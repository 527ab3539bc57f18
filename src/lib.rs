//! Lays out invoices and renders them to PDF.
//!
//! An [InvoiceRequest](invoice::InvoiceRequest) is decoded and validated up front,
//! optional logo and signature [Asset]s are decoded into images, [layout] turns the
//! invoice into positioned draw commands, [render()] writes those into a PDF and an
//! [ArtifactStore] keeps the result under `invoice-{invoiceNo}.pdf`.
//! [InvoiceGenerator] runs the whole chain.

mod asset;
pub use asset::*;

mod colour;
pub use colour::*;

pub mod config;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod generator;
pub use generator::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// The invoice data model and request decoding
pub mod invoice;

/// Positioning of invoice content on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod store;
pub use store::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
