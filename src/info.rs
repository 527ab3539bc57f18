use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document information dictionary written into every invoice
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    /// Shown by readers in the title bar, e.g. `Invoice 1001`
    pub title: Option<String>,
    /// The party issuing the document
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Comma separated search terms, such as the invoice and order numbers
    pub keywords: Option<String>,
}

impl Info {
    /// Metadata for an invoice issued by `seller`
    pub fn for_invoice(invoice_no: &str, order_no: &str, seller: &str) -> Info {
        Info {
            title: Some(format!("Invoice {invoice_no}")),
            author: Some(seller.to_string()),
            subject: Some(format!("Tax invoice for order {order_no}")),
            keywords: Some(format!("invoice {invoice_no}, order {order_no}")),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&Local::now()));
    }
}

/// Convert a timestamp into a PDF date, keeping its UTC offset
fn pdf_date<Tz: TimeZone>(when: &DateTime<Tz>) -> PDate {
    let offset = when.offset().fix().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(when.year() as u16)
        .month(when.month() as u8)
        .day(when.day() as u8)
        .hour(when.hour() as u8)
        .minute(when.minute() as u8)
        .second(when.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
