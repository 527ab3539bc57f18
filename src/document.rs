use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// A lightweight reference to an image registered with a [Document]. Layout uses
/// the pixel dimensions to keep the aspect ratio when scaling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageHandle {
    pub id: Id<Image>,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    /// Height of the image when drawn `width` wide
    pub fn height_at(&self, width: Pt) -> Pt {
        if self.width == 0 {
            return Pt(0.0);
        }
        width * (self.height as f32 / self.width as f32)
    }
}

#[derive(Default)]
/// A document stores all the contents of the PDF then renders it out with a
/// call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can draw it through the returned handle.
    pub fn add_image(&mut self, image: Image) -> ImageHandle {
        let (width, height) = (image.width, image.height);
        let id = self.images.alloc(image);
        ImageHandle { id, width, height }
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is serialized in memory first, a limitation of the
    /// underlying pdf-writer implementation.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.alloc(RefType::Catalog);
        let page_tree_id = refs.alloc(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.alloc(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for font in Font::ALL.iter() {
            font.write(&mut refs, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice())?;
        w.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::LETTER;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn writes_a_pdf_header_and_page_tree() {
        let mut doc = Document::default();
        doc.set_info(Info::for_invoice("42", "PO-1", "Seller"));
        doc.add_page(Page::new(LETTER));
        doc.add_page(Page::new(LETTER));

        let mut out = Vec::new();
        doc.write(&mut out).expect("document writes");
        assert!(out.starts_with(b"%PDF-"));
        assert!(contains(&out, b"/Count 2"));
        assert!(contains(&out, b"/BaseFont /Helvetica"));
        assert!(contains(&out, b"(Invoice 42)"));
    }

    #[test]
    fn scales_image_height_by_aspect_ratio() {
        let mut doc = Document::default();
        let handle = doc.add_image(
            Image::from_bytes(
                {
                    let mut png = std::io::Cursor::new(Vec::new());
                    image::DynamicImage::ImageRgb8(image::RgbImage::new(200, 50))
                        .write_to(&mut png, image::ImageOutputFormat::Png)
                        .expect("can encode png");
                    png.into_inner()
                },
                None,
            )
            .expect("png decodes"),
        );
        assert_eq!((handle.width, handle.height), (200, 50));
        assert_eq!(handle.height_at(Pt(100.0)), Pt(25.0));
    }

    #[test]
    fn write_errors_surface_as_io_failures() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut doc = Document::default();
        doc.add_page(Page::new(LETTER));
        assert!(matches!(doc.write(Broken), Err(PDFError::Io(_))));
    }
}
