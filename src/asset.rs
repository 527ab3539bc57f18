use crate::image::Image;
use crate::InvoiceError;
use std::fmt;
use std::path::Path;

/// Which slot of the invoice an asset fills
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Signature,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Logo => f.write_str("logo"),
            AssetKind::Signature => f.write_str("signature"),
        }
    }
}

/// Raw bytes of an uploaded image along with the file extension it was declared with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub extension: Option<String>,
}

impl Asset {
    pub fn new<E: ToString>(bytes: Vec<u8>, extension: Option<E>) -> Asset {
        Asset {
            bytes,
            extension: extension.map(|e| e.to_string().trim_start_matches('.').to_lowercase()),
        }
    }

    /// Read an asset from disk in full, taking the extension from the path
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Asset> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Asset::new(
            bytes,
            path.extension().map(|e| e.to_string_lossy()),
        ))
    }
}

/// Decode an optional asset. A missing asset is not an error and yields `None`;
/// bytes that are present but don't decode as an image fail the whole request.
pub fn resolve(kind: AssetKind, asset: Option<Asset>) -> Result<Option<Image>, InvoiceError> {
    let Some(Asset { bytes, extension }) = asset else {
        tracing::debug!(%kind, "no asset supplied");
        return Ok(None);
    };

    let size = bytes.len();
    let image = Image::from_bytes(bytes, extension.as_deref())
        .map_err(|source| InvoiceError::InvalidAsset { kind, source })?;
    tracing::debug!(
        %kind,
        bytes = size,
        width = image.width,
        height = image.height,
        passthrough = image.is_passthrough(),
        "decoded asset"
    );
    Ok(Some(image))
}
