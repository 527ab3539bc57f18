use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("unrecognized image format")]
    UnknownFormat,

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

#[derive(Debug)]
enum ImageData {
    /// Baseline or progressive JPEG that PDF readers can decode themselves
    DirectlyEmbeddableJpeg { bytes: Vec<u8>, grey: bool },
    Raster(DynamicImage),
}

/// A decoded image, ready to be placed on pages. Dimensions are in pixels; the
/// layout scales images to whatever size they are drawn at.
#[derive(Debug)]
pub struct Image {
    data: ImageData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    grey: bool,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image from raw bytes. The format is sniffed from the data; `extension`
    /// is only consulted for formats without a signature, such as TGA.
    pub fn from_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<Image, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let format = match image::guess_format(&bytes) {
            Ok(format) => format,
            Err(_) => extension
                .and_then(ImageFormat::from_extension)
                .ok_or(ImageError::UnknownFormat)?,
        };
        let image = image::load_from_memory_with_format(&bytes, format)?;
        let (width, height) = (image.width(), image.height());

        // CMYK jpegs are converted to RGB by the decoder, so check the stream itself
        let data = match (format, image.color(), jpeg_components(&bytes)) {
            (ImageFormat::Jpeg, ColorType::Rgb8, Some(3)) => ImageData::DirectlyEmbeddableJpeg {
                bytes,
                grey: false,
            },
            (ImageFormat::Jpeg, ColorType::L8, Some(1)) => {
                ImageData::DirectlyEmbeddableJpeg { bytes, grey: true }
            }
            _ => ImageData::Raster(image),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    /// Whether the image bytes will be copied into the PDF untouched
    pub fn is_passthrough(&self) -> bool {
        matches!(self.data, ImageData::DirectlyEmbeddableJpeg { .. })
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::DirectlyEmbeddableJpeg { bytes, grey } => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                grey: *grey,
                mask: None,
            },
            ImageData::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    grey: false,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.alloc(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        if encoded.grey {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

/// Number of colour components declared in a JPEG's start-of-frame header
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        let length = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        match marker {
            // SOF0..SOF15, skipping DHT (c4), JPG (c8) and DAC (cc)
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                return bytes.get(i + 9).copied();
            }
            _ => i += 2 + length,
        }
    }
    None
}
