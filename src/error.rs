use crate::asset::AssetKind;
use crate::image::ImageError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while serializing a document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred while writing to the sink
    Io(#[from] std::io::Error),

    #[error("a page referenced by the document was never allocated")]
    /// A page could not be resolved while writing the page tree
    PageMissing,
}

/// Reasons an invoice request is rejected before any rendering happens
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("missing required field(s): {}", .0.join(", "))]
    /// Every required field path that was absent or null
    MissingFields(Vec<String>),

    #[error("`{field}` is not valid: {source}")]
    /// A field (or the whole request) could not be decoded as JSON of the expected shape
    InvalidJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{field}` {reason}")]
    /// A field was present but its value is unusable
    InvalidField { field: String, reason: String },
}

/// All errors an invoice generation call can end with
#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] RequestError),

    #[error("invalid {kind} asset: {source}")]
    InvalidAsset {
        kind: AssetKind,
        #[source]
        source: ImageError,
    },

    #[error("failed to render invoice: {0}")]
    RenderFailure(#[from] PDFError),

    #[error("failed to store invoice at {}: {source}", .path.display())]
    StoreFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
