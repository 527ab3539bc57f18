#![allow(dead_code)]

use invoice_gen::config::Settings;
use invoice_gen::invoice::InvoiceRequest;
use invoice_gen::{Asset, FsArtifactStore, InvoiceGenerator};
use lopdf::Document as LopdfDocument;
use serde_json::{json, Value};
use std::io::Cursor;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A generator writing into its own temporary directory, removed on drop
pub struct Harness {
    pub dir: TempDir,
    pub generator: InvoiceGenerator<FsArtifactStore>,
}

impl Harness {
    pub fn new() -> Harness {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let settings = Settings {
            artifacts_dir: dir.path().join("invoices"),
            ..Settings::default()
        };
        let store = FsArtifactStore::new(&settings.artifacts_dir, settings.retrieval_prefix.as_str());
        Harness {
            generator: InvoiceGenerator::new(&settings, store),
            dir,
        }
    }

    /// Every file currently in the artifacts directory
    pub fn stored_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.generator.store().root()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

pub fn party(name: &str) -> Value {
    json!({
        "name": name,
        "address": "12 Main Road",
        "city": "Pune",
        "state": "Maharashtra",
        "pincode": "411001",
        "stateCode": "27",
        "pan": "AAAPL1234C",
        "gst": "27AAAPL1234C1Z5"
    })
}

/// The request used throughout: invoice 1001 with a single widget line
pub fn sample_request() -> Value {
    json!({
        "sellerDetails": party("Acme Traders"),
        "billingDetails": party("Globex Retail"),
        "shippingDetails": party("Globex Warehouse"),
        "orderDetails": { "orderNo": "PO-7", "orderDate": "2024-03-01" },
        "invoiceDetails": { "invoiceNo": "1001", "invoiceDate": "2024-03-09" },
        "placeOfSupply": "Maharashtra",
        "placeOfDelivery": "Maharashtra",
        "reverseCharge": "No",
        "items": [
            { "description": "Widget", "unitPrice": 10.0, "quantity": 3, "discount": 1.5 }
        ]
    })
}

pub fn decode(value: &Value) -> InvoiceRequest {
    InvoiceRequest::from_json(value.to_string().as_bytes()).expect("fixture request is valid")
}

/// A PNG of the given size, half transparent so that it needs a soft mask
pub fn png_asset(width: u32, height: u32) -> Asset {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([20, 40, 160, 128]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .expect("can encode png");
    Asset::new(bytes.into_inner(), Some("png"))
}

pub fn jpeg_asset(width: u32, height: u32) -> Asset {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, image::ImageOutputFormat::Jpeg(85))
        .expect("can encode jpeg");
    Asset::new(bytes.into_inner(), Some("jpg"))
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

pub fn page_count(bytes: &[u8]) -> usize {
    LopdfDocument::load_mem(bytes)
        .expect("output parses as a PDF")
        .get_pages()
        .len()
}
