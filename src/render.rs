//! Turns laid out draw commands into PDF pages.

use crate::colour::colours;
use crate::document::Document;
use crate::layout::DrawCommand;
use crate::page::{ImageLayout, Page, RuleLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::InvoiceError;
use std::io::Write;

/// Stroke width of an underline, a tenth of the font size but never thinner than half a point
fn underline_width(font: &SpanFont) -> Pt {
    Pt((font.size.0 / 10.0).floor().max(0.5))
}

/// Distributes `commands` over pages of `page_size`, in order, starting a new page
/// on every [DrawCommand::PageBreak]. Always returns at least one page.
pub(crate) fn paginate(commands: &[DrawCommand], page_size: PageSize) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::new(page_size);
    let page_height = page.height();

    for command in commands.iter() {
        match command {
            DrawCommand::PageBreak => {
                pages.push(std::mem::replace(&mut page, Page::new(page_size)));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                width,
                underline,
            } => {
                let ascent = font.font.ascent(font.size);
                page.add_span(SpanLayout {
                    text: text.clone(),
                    font: *font,
                    colour: colours::BLACK,
                    coords: (*x, page_height - (*y + ascent)),
                });

                if *underline {
                    let line_width = underline_width(font);
                    let text_height = ascent - font.font.descent(font.size);
                    let line_y = page_height - (*y + text_height - line_width);
                    page.add_rule(RuleLayout {
                        from: (*x, line_y),
                        to: (*x + *width, line_y),
                        width: line_width,
                        colour: colours::BLACK,
                    });
                }
            }
            DrawCommand::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                page.add_image(ImageLayout {
                    image_id: image.id,
                    position: Rect {
                        x1: *x,
                        y1: page_height - (*y + *height),
                        x2: *x + *width,
                        y2: page_height - *y,
                    },
                });
            }
        }
    }
    pages.push(page);
    pages
}

/// Draws `commands` onto pages of `page_size` and writes the finished document to
/// `sink`. Images referenced by the commands must have been added to `document`
/// beforehand.
pub fn render<W: Write>(
    mut document: Document,
    commands: &[DrawCommand],
    page_size: PageSize,
    sink: W,
) -> Result<(), InvoiceError> {
    for page in paginate(commands, page_size) {
        document.add_page(page);
    }

    tracing::debug!(
        pages = document.pages.len(),
        images = document.images.len(),
        commands = commands.len(),
        "rendering document"
    );
    document.write(sink)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use crate::image::Image;
    use crate::page::PageContents;
    use crate::pagesize::LETTER;
    use crate::PDFError;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn text(x: f32, y: f32, s: &str, underline: bool) -> DrawCommand {
        let font = SpanFont {
            font: Font::Helvetica,
            size: Pt(12.0),
        };
        DrawCommand::Text {
            x: Pt(x),
            y: Pt(y),
            text: s.to_string(),
            font,
            width: font.font.width_of_text(s, font.size),
            underline,
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut png = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
            .write_to(&mut png, image::ImageOutputFormat::Png)
            .expect("can encode png");
        png.into_inner()
    }

    #[test]
    fn page_breaks_start_new_pages() {
        let commands = vec![
            text(72.0, 72.0, "first", false),
            DrawCommand::PageBreak,
            text(72.0, 72.0, "second", false),
            DrawCommand::PageBreak,
            text(72.0, 72.0, "third", false),
        ];
        let mut out = Vec::new();
        render(Document::default(), &commands, LETTER, &mut out).expect("renders");
        assert!(out.starts_with(b"%PDF-"));
        assert!(contains(&out, b"/Count 3"));
    }

    fn close(a: Pt, b: f32) -> bool {
        (a.0 - b).abs() < 1e-3
    }

    #[test]
    fn text_is_placed_on_its_baseline() {
        let pages = paginate(&[text(72.0, 100.0, "Net Amount", false)], LETTER);
        match &pages[0].contents[..] {
            [PageContents::Text(spans)] => {
                assert_eq!(spans[0].text, "Net Amount");
                assert_eq!(spans[0].coords.0, Pt(72.0));
                // 792 - (100 + 12 * 0.718)
                assert!(close(spans[0].coords.1, 683.384));
            }
            other => panic!("unexpected contents {other:?}"),
        }
    }

    #[test]
    fn underlines_run_under_the_text() {
        let command = text(72.0, 100.0, "Billing Details:", true);
        let width = match &command {
            DrawCommand::Text { width, .. } => *width,
            _ => unreachable!(),
        };
        let pages = paginate(&[command], LETTER);
        match &pages[0].contents[..] {
            [PageContents::Text(_), PageContents::Rule(rule)] => {
                assert_eq!(rule.width, Pt(1.0));
                // 792 - (100 + 11.1 - 1)
                assert!(close(rule.from.1, 681.9));
                assert_eq!(rule.from.1, rule.to.1);
                assert_eq!(rule.from.0, Pt(72.0));
                assert!(close(rule.to.0 - rule.from.0, width.0));
            }
            other => panic!("unexpected contents {other:?}"),
        }
    }

    #[test]
    fn commands_keep_their_order_within_a_page() {
        let pages = paginate(
            &[
                text(72.0, 72.0, "one", false),
                text(72.0, 86.0, "two", false),
                DrawCommand::PageBreak,
                text(72.0, 72.0, "three", false),
            ],
            LETTER,
        );
        let texts: Vec<Vec<&str>> = pages
            .iter()
            .map(|page| {
                page.contents
                    .iter()
                    .filter_map(|c| match c {
                        PageContents::Text(spans) => Some(spans[0].text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        assert_eq!(texts, vec![vec!["one", "two"], vec!["three"]]);
    }

    #[test]
    fn underline_width_has_a_floor() {
        let small = SpanFont {
            font: Font::Helvetica,
            size: Pt(8.0),
        };
        assert_eq!(underline_width(&small), Pt(0.5));
        let title = SpanFont {
            font: Font::Helvetica,
            size: Pt(20.0),
        };
        assert_eq!(underline_width(&title), Pt(2.0));
    }

    #[test]
    fn images_are_flipped_into_pdf_space() {
        let mut document = Document::default();
        let handle = document.add_image(Image::from_bytes(png(200, 100), None).expect("decodes"));
        let commands = vec![DrawCommand::Image {
            image: handle,
            x: Pt(50.0),
            y: Pt(50.0),
            width: Pt(100.0),
            height: handle.height_at(Pt(100.0)),
        }];
        let mut out = Vec::new();
        render(document, &commands, LETTER, &mut out).expect("renders");
        // scaled to 100x50 with its bottom-left corner at (50, 792 - 100)
        assert!(contains(&out, b"100 0 0 50 50 692 cm"));
        assert!(contains(&out, b"/I0 Do"));
    }

    #[test]
    fn sink_failures_are_render_failures() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = render(Document::default(), &[], LETTER, Full).expect_err("sink is full");
        assert!(matches!(err, InvoiceError::RenderFailure(PDFError::Io(_))));
    }
}
