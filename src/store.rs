//! Persistence of finished invoices.

use crate::InvoiceError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A stored invoice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// `invoice-{invoiceNo}.pdf`
    pub name: String,
    /// Path under which the artifact is served, e.g. `/invoices/invoice-1001.pdf`
    pub retrieval_path: String,
    /// Where the bytes actually live
    pub location: PathBuf,
    pub size: u64,
}

/// The name an invoice is stored under. Storing the same invoice number again
/// replaces the earlier artifact.
pub fn artifact_name(invoice_no: &str) -> String {
    format!("invoice-{invoice_no}.pdf")
}

/// Somewhere finished invoices can be written to. Implementations must tolerate
/// concurrent calls, including concurrent calls for the same invoice number.
pub trait ArtifactStore: Send + Sync {
    fn store(&self, invoice_no: &str, bytes: &[u8]) -> Result<Artifact, InvoiceError>;
}

/// Stores invoices as files in a single directory, which is created on first use.
///
/// Bytes are written to a temporary file next to the target and renamed over it, so
/// a reader sees either the previous invoice or the new one in full. When two writes
/// for the same invoice race, whichever rename lands last wins.
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
    retrieval_prefix: String,
}

impl FsArtifactStore {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(root: P, retrieval_prefix: S) -> FsArtifactStore {
        FsArtifactStore {
            root: root.into(),
            retrieval_prefix: retrieval_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn retrieval_path(&self, name: &str) -> String {
        format!("{}/{}", self.retrieval_prefix.trim_end_matches('/'), name)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn store(&self, invoice_no: &str, bytes: &[u8]) -> Result<Artifact, InvoiceError> {
        let name = artifact_name(invoice_no);
        let location = self.root.join(&name);
        let failed = |source: std::io::Error| InvoiceError::StoreFailure {
            path: location.clone(),
            source,
        };

        std::fs::create_dir_all(&self.root).map_err(failed)?;
        let mut file = NamedTempFile::new_in(&self.root).map_err(failed)?;
        file.write_all(bytes).map_err(failed)?;
        file.as_file().sync_all().map_err(failed)?;
        file.persist(&location).map_err(|e| failed(e.error))?;

        tracing::debug!(path = %location.display(), bytes = bytes.len(), "wrote artifact");
        Ok(Artifact {
            retrieval_path: self.retrieval_path(&name),
            name,
            location,
            size: bytes.len() as u64,
        })
    }
}
