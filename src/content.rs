//! Conversion of page contents into a PDF content stream.

use crate::colour::Colour;
use crate::page::{PageContents, SpanFont, SpanLayout};
use pdf_writer::{Content, Name, Str};

/// Renders page contents to a PDF content stream, painting items in the order
/// they were added to the page.
pub(crate) fn render_contents(contents: &[PageContents]) -> Vec<u8> {
    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans),
            PageContents::Image(image) => {
                content.save_state();
                content.transform([
                    (image.position.x2 - image.position.x1).into(),
                    0.0,
                    0.0,
                    (image.position.y2 - image.position.y1).into(),
                    image.position.x1.into(),
                    image.position.y1.into(),
                ]);
                content.x_object(Name(format!("I{}", image.image_id.index()).as_bytes()));
                content.restore_state();
            }
            PageContents::Rule(rule) => {
                content.save_state();
                set_stroke_colour(&mut content, rule.colour);
                content.set_line_width(rule.width.into());
                content.move_to(rule.from.0.into(), rule.from.1.into());
                content.line_to(rule.to.0.into(), rule.to.1.into());
                content.stroke();
                content.restore_state();
            }
        }
    }

    content.finish()
}

fn render_text_spans(content: &mut Content, spans: &[SpanLayout]) {
    let Some(first) = spans.first() else {
        return;
    };

    content.save_state();

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    set_fill_colour(content, current_colour);

    content.begin_text();
    content.set_font(
        Name(current_font.font.resource_name().as_bytes()),
        current_font.size.into(),
    );

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            content.set_font(
                Name(current_font.font.resource_name().as_bytes()),
                current_font.size.into(),
            );
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            set_fill_colour(content, current_colour);
        }

        // absolute positioning for each span
        content.set_text_matrix([
            1.0,
            0.0,
            0.0,
            1.0,
            span.coords.0.into(),
            span.coords.1.into(),
        ]);
        content.show(Str(&current_font.font.encode(&span.text)));
    }

    content.end_text();
    content.restore_state();
}

fn set_fill_colour(content: &mut Content, colour: Colour) {
    let Colour::Grey { g } = colour;
    content.set_fill_gray(g);
}

fn set_stroke_colour(content: &mut Content, colour: Colour) {
    let Colour::Grey { g } = colour;
    content.set_stroke_gray(g);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::Font;
    use crate::page::RuleLayout;
    use crate::units::Pt;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn empty_page_renders_nothing() {
        assert!(render_contents(&[]).is_empty());
    }

    #[test]
    fn text_is_positioned_and_shown() {
        let rendered = render_contents(&[PageContents::Text(vec![SpanLayout {
            text: "Net Amount".into(),
            font: SpanFont {
                font: Font::Helvetica,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(700.0)),
        }])]);
        assert!(contains(&rendered, b"/F0 12 Tf"));
        assert!(contains(&rendered, b"1 0 0 1 72 700 Tm"));
        assert!(contains(&rendered, b"(Net Amount) Tj"));
    }

    #[test]
    fn rules_are_stroked() {
        let rendered = render_contents(&[PageContents::Rule(RuleLayout {
            from: (Pt(72.0), Pt(600.0)),
            to: (Pt(150.0), Pt(600.0)),
            width: Pt(1.0),
            colour: colours::BLACK,
        })]);
        assert!(contains(&rendered, b"72 600 m"));
        assert!(contains(&rendered, b"150 600 l"));
        assert!(contains(&rendered, b"S\nQ"));
    }

    #[test]
    fn black_is_painted_in_device_grey() {
        let rendered = render_contents(&[
            PageContents::Text(vec![SpanLayout {
                text: "Invoice".into(),
                font: SpanFont {
                    font: Font::Helvetica,
                    size: Pt(12.0),
                },
                colour: colours::BLACK,
                coords: (Pt(72.0), Pt(700.0)),
            }]),
            PageContents::Rule(RuleLayout {
                from: (Pt(72.0), Pt(690.0)),
                to: (Pt(120.0), Pt(690.0)),
                width: Pt(1.0),
                colour: colours::BLACK,
            }),
        ]);
        assert!(contains(&rendered, b"0 g"));
        assert!(contains(&rendered, b"0 G"));
        assert!(!contains(&rendered, b" rg"));
        assert!(!contains(&rendered, b" RG"));
    }
}
