use super::{wrap_text, width_of_text, DrawCommand, LayoutCursor, Margins};
use crate::document::ImageHandle;
use crate::font::Font;
use crate::invoice::{format_amount, InvoiceRequest, Party};
use crate::page::SpanFont;
use crate::pagesize::{PageSize, LETTER};
use crate::units::Pt;

/// Left edges of the item table's description, unit price, quantity, discount and
/// net amount columns
pub const COLUMN_OFFSETS: [Pt; 5] = [Pt(50.0), Pt(200.0), Pt(300.0), Pt(350.0), Pt(400.0)];

const TABLE_HEADER: [&str; 5] = [
    "Item Description",
    "Unit Price",
    "Quantity",
    "Discount",
    "Net Amount",
];

const LOGO_POSITION: (Pt, Pt) = (Pt(50.0), Pt(50.0));
const IMAGE_WIDTH: Pt = Pt(100.0);
const SIGNATURE_X: Pt = Pt(50.0);
/// Distance from the bottom of the signature image down to its caption
const SIGNATORY_GAP: Pt = Pt(50.0);

/// Page geometry and type sizes used when laying out an invoice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub page_size: PageSize,
    pub margins: Margins,
    pub body_font_size: Pt,
    pub title_font_size: Pt,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            page_size: LETTER,
            margins: Margins::all(Pt(72.0)),
            body_font_size: Pt(12.0),
            title_font_size: Pt(20.0),
        }
    }
}

impl LayoutSettings {
    fn body(&self) -> SpanFont {
        SpanFont {
            font: Font::Helvetica,
            size: self.body_font_size,
        }
    }

    fn title(&self) -> SpanFont {
        SpanFont {
            font: Font::HelveticaBold,
            size: self.title_font_size,
        }
    }

    fn line_height(&self) -> Pt {
        Font::Helvetica.line_height(self.body_font_size)
    }

    /// Narrowest the net amount column may be: its header on one line, rounded up to
    /// a whole point
    fn net_column_width(&self) -> Pt {
        Pt(width_of_text(TABLE_HEADER[4], &self.body()).0.ceil())
    }

    /// Check that type sizes and margins are usable and that the page is wide
    /// enough for the item table's fixed columns
    pub fn validate(&self) -> Result<(), String> {
        for (name, size) in [
            ("body_font_size", self.body_font_size),
            ("title_font_size", self.title_font_size),
        ] {
            if !(size.0.is_finite() && size.0 > 0.0) {
                return Err(format!("`{name}` must be greater than 0, got {size}"));
            }
        }

        let Margins {
            top,
            right,
            bottom,
            left,
        } = self.margins;
        if [top, right, bottom, left]
            .iter()
            .any(|m| !(m.0.is_finite() && m.0 >= 0.0))
        {
            return Err("margins must not be negative".to_string());
        }

        let (width, height) = self.page_size;
        if left + right >= width || top + bottom >= height {
            return Err("margins leave no room on the page".to_string());
        }

        let available = width - right - COLUMN_OFFSETS[4];
        let needed = self.net_column_width();
        if available < needed {
            return Err(format!(
                "the item table needs {needed}pt right of its last column offset but the \
                 page leaves {available}pt; use a wider page or a smaller right margin"
            ));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
enum Align {
    Left,
    Center,
}

/// Lays out one invoice, top to bottom, as a list of draw commands. Optional images
/// that are `None` are skipped without leaving a gap. Every value the invoice prints
/// has already been validated, so layout can't fail.
pub fn layout_invoice(
    request: &InvoiceRequest,
    logo: Option<ImageHandle>,
    signature: Option<ImageHandle>,
    settings: &LayoutSettings,
) -> Vec<DrawCommand> {
    let mut layout = InvoiceLayout {
        cursor: LayoutCursor::new(settings.page_size, settings.margins),
        settings,
    };

    if let Some(logo) = logo {
        // pinned to the corner, text flows as though it weren't there
        let (x, y) = LOGO_POSITION;
        layout.cursor.push(DrawCommand::Image {
            image: logo,
            x,
            y,
            width: IMAGE_WIDTH,
            height: logo.height_at(IMAGE_WIDTH),
        });
    }

    layout.flow("Invoice", settings.title(), Align::Center, false);

    let seller = &request.seller;
    layout.line(format!("Seller: {}", seller.name));
    layout.line(format!("Address: {}", seller.address_line()));
    layout.line(format!("PAN: {}", optional(&seller.pan)));
    layout.line(format!("GST: {}", optional(&seller.gst)));
    layout.paragraph_break();

    layout.line(format!("Invoice No: {}", request.invoice.invoice_no));
    layout.line(format!("Invoice Date: {}", request.invoice.invoice_date));
    layout.line(format!("Order No: {}", request.order.order_no));
    layout.line(format!("Order Date: {}", request.order.order_date));
    layout.paragraph_break();

    layout.party("Billing Details:", &request.billing);
    layout.paragraph_break();
    layout.party("Shipping Details:", &request.shipping);
    layout.paragraph_break();

    layout.line(format!("Place of Supply: {}", request.place_of_supply));
    layout.line(format!("Place of Delivery: {}", request.place_of_delivery));
    layout.line(format!("Reverse Charge: {}", request.reverse_charge));
    layout.paragraph_break();

    layout.row(TABLE_HEADER.map(String::from), settings.body());
    for item in request.items.iter() {
        layout.row(
            [
                item.description.clone(),
                format_amount(item.unit_price),
                item.quantity.to_string(),
                format_amount(item.discount),
                item.net_amount().map(format_amount).unwrap_or_default(),
            ],
            settings.body(),
        );
    }

    if let Some(signature) = signature {
        layout.signature(signature);
    }

    let pages = layout.cursor.pages();
    let commands = layout.cursor.into_commands();
    tracing::debug!(
        invoice_no = %request.invoice.invoice_no,
        items = request.items.len(),
        commands = commands.len(),
        pages,
        "laid out invoice"
    );
    commands
}

fn optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

struct InvoiceLayout<'s> {
    cursor: LayoutCursor,
    settings: &'s LayoutSettings,
}

impl InvoiceLayout<'_> {
    fn line<S: AsRef<str>>(&mut self, text: S) {
        self.flow(text.as_ref(), self.settings.body(), Align::Left, false);
    }

    /// Text wrapped to the content box, one command per wrapped line
    fn flow(&mut self, text: &str, font: SpanFont, align: Align, underline: bool) {
        let content_box = self.cursor.content_box();
        let line_height = font.font.line_height(font.size);

        for line in wrap_text(text, &font, content_box.width()) {
            self.cursor.ensure_room(line_height);
            let width = width_of_text(&line, &font);
            let x = match align {
                Align::Left => content_box.x1,
                Align::Center => content_box.x1 + (content_box.width() - width) / 2.0,
            };
            if !line.is_empty() {
                self.cursor.push(DrawCommand::Text {
                    x,
                    y: self.cursor.y(),
                    text: line,
                    font,
                    width,
                    underline,
                });
            }
            self.cursor.advance(line_height);
        }
    }

    fn paragraph_break(&mut self) {
        self.cursor.advance(self.settings.line_height());
    }

    fn party(&mut self, heading: &str, party: &Party) {
        self.flow(heading, self.settings.body(), Align::Left, true);
        self.line(&party.name);
        self.line(party.address_line());
        self.line(format!("State Code: {}", optional(&party.state_code)));
    }

    /// One table row. Each cell wraps within its column, the row is as tall as its
    /// tallest cell and is never split across pages.
    fn row(&mut self, cells: [String; 5], font: SpanFont) {
        // the last column runs to the right margin but is never squeezed below its
        // header, even on a page that is too narrow
        let last_width = match self.cursor.content_box().x2 - COLUMN_OFFSETS[4] {
            width if width < self.settings.net_column_width() => self.settings.net_column_width(),
            width => width,
        };
        let line_height = font.font.line_height(font.size);

        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = match COLUMN_OFFSETS.get(i + 1) {
                    Some(next) => *next - COLUMN_OFFSETS[i],
                    None => last_width,
                };
                wrap_text(cell, &font, width)
            })
            .collect();
        let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = line_height * row_lines as f32;

        self.cursor.ensure_room(row_height);
        let top = self.cursor.y();
        for (x, lines) in COLUMN_OFFSETS.iter().zip(wrapped) {
            for (i, line) in lines.into_iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let width = width_of_text(&line, &font);
                self.cursor.push(DrawCommand::Text {
                    x: *x,
                    y: top + line_height * i as f32,
                    text: line,
                    font,
                    width,
                    underline: false,
                });
            }
        }
        self.cursor.advance(row_height);
    }

    fn signature(&mut self, signature: ImageHandle) {
        let font = self.settings.body();
        let line_height = self.settings.line_height();
        let height = signature.height_at(IMAGE_WIDTH);

        self.paragraph_break();
        // the image and its caption stay together
        self.cursor.ensure_room(height + SIGNATORY_GAP + line_height);
        self.cursor.push(DrawCommand::Image {
            image: signature,
            x: SIGNATURE_X,
            y: self.cursor.y(),
            width: IMAGE_WIDTH,
            height,
        });
        self.cursor.advance(height);

        let caption = "Authorized Signatory";
        let y = self.cursor.y() + SIGNATORY_GAP;
        self.cursor.push(DrawCommand::Text {
            x: SIGNATURE_X,
            y,
            text: caption.to_string(),
            font,
            width: width_of_text(caption, &font),
            underline: false,
        });
        self.cursor.move_to(y + line_height);
    }
}
