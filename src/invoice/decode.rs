use super::{InvoiceInfo, InvoiceRequest, LineItem, OrderInfo, Party};
use crate::RequestError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// A value printed verbatim. Upstream forms send strings, but numbers (pincodes)
/// and booleans (reverse charge) are accepted and kept as their textual form.
#[derive(Debug, Clone, PartialEq)]
struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl Visitor<'_> for TextVisitor {
            type Value = Text;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
                Ok(Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Text, E> {
                Ok(Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

// Every field is optional here so that one validation pass can report all of the
// missing ones at once instead of failing on the first.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParty {
    name: Option<Text>,
    address: Option<Text>,
    city: Option<Text>,
    state: Option<Text>,
    pincode: Option<Text>,
    state_code: Option<Text>,
    pan: Option<Text>,
    gst: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrder {
    order_no: Option<Text>,
    order_date: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInvoice {
    invoice_no: Option<Text>,
    invoice_date: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineItem {
    description: Option<Text>,
    unit_price: Option<Decimal>,
    quantity: Option<Decimal>,
    discount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    seller_details: Option<RawParty>,
    billing_details: Option<RawParty>,
    shipping_details: Option<RawParty>,
    order_details: Option<RawOrder>,
    invoice_details: Option<RawInvoice>,
    place_of_supply: Option<Text>,
    place_of_delivery: Option<Text>,
    reverse_charge: Option<Text>,
    items: Option<Vec<RawLineItem>>,
}

impl InvoiceRequest {
    /// Decode a request from a single JSON object using the wire field names
    /// (`sellerDetails`, `billingDetails`, `shippingDetails`, `orderDetails`,
    /// `invoiceDetails`, `items`, `placeOfSupply`, `placeOfDelivery`, `reverseCharge`).
    pub fn from_json(bytes: &[u8]) -> Result<InvoiceRequest, RequestError> {
        let raw: RawRequest =
            serde_json::from_slice(bytes).map_err(|source| RequestError::InvalidJson {
                field: "request".to_string(),
                source,
            })?;
        raw.validate()
    }

    /// Decode a request from upload form fields, where each of the party, order,
    /// invoice and item groups arrives as a JSON encoded string and the place and
    /// reverse charge fields are plain text. Unknown fields are ignored.
    pub fn from_form_fields<I, K, V>(fields: I) -> Result<InvoiceRequest, RequestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawRequest::default();
        for (name, value) in fields {
            let (name, value) = (name.as_ref(), value.as_ref());
            match name {
                "sellerDetails" => raw.seller_details = parse_group(name, value)?,
                "billingDetails" => raw.billing_details = parse_group(name, value)?,
                "shippingDetails" => raw.shipping_details = parse_group(name, value)?,
                "orderDetails" => raw.order_details = parse_group(name, value)?,
                "invoiceDetails" => raw.invoice_details = parse_group(name, value)?,
                "items" => raw.items = parse_group(name, value)?,
                "placeOfSupply" => raw.place_of_supply = Some(Text(value.to_string())),
                "placeOfDelivery" => raw.place_of_delivery = Some(Text(value.to_string())),
                "reverseCharge" => raw.reverse_charge = Some(Text(value.to_string())),
                _ => tracing::debug!(field = name, "ignoring unknown form field"),
            }
        }
        raw.validate()
    }
}

fn parse_group<T: DeserializeOwned>(field: &str, value: &str) -> Result<Option<T>, RequestError> {
    serde_json::from_str(value).map_err(|source| RequestError::InvalidJson {
        field: field.to_string(),
        source,
    })
}

/// Collects every missing path and the first unusable value while walking a request
#[derive(Default)]
struct Validator {
    missing: Vec<String>,
    invalid: Option<(String, String)>,
}

impl Validator {
    fn field<T>(&mut self, path: String, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(path);
        }
        value
    }

    fn text(&mut self, path: String, value: Option<Text>) -> Option<String> {
        self.field(path, value).map(|Text(s)| s)
    }

    fn reject(&mut self, path: String, reason: &str) {
        if self.invalid.is_none() {
            self.invalid = Some((path, reason.to_string()));
        }
    }

    fn party(&mut self, group: &str, raw: Option<RawParty>) -> Option<Party> {
        let raw = self.field(group.to_string(), raw)?;
        let path = |field: &str| format!("{group}.{field}");

        let name = self.text(path("name"), raw.name);
        let address = self.text(path("address"), raw.address);
        let city = self.text(path("city"), raw.city);
        let state = self.text(path("state"), raw.state);
        let pincode = self.text(path("pincode"), raw.pincode);

        Some(Party {
            name: name?,
            address: address?,
            city: city?,
            state: state?,
            pincode: pincode?,
            state_code: raw.state_code.map(|Text(s)| s),
            pan: raw.pan.map(|Text(s)| s),
            gst: raw.gst.map(|Text(s)| s),
        })
    }

    fn order(&mut self, raw: Option<RawOrder>) -> Option<OrderInfo> {
        let raw = self.field("orderDetails".to_string(), raw)?;
        let order_no = self.text("orderDetails.orderNo".to_string(), raw.order_no);
        let order_date = self.text("orderDetails.orderDate".to_string(), raw.order_date);
        Some(OrderInfo {
            order_no: order_no?,
            order_date: order_date?,
        })
    }

    fn invoice(&mut self, raw: Option<RawInvoice>) -> Option<InvoiceInfo> {
        let raw = self.field("invoiceDetails".to_string(), raw)?;
        let invoice_no = self.text("invoiceDetails.invoiceNo".to_string(), raw.invoice_no);
        let invoice_date = self.text("invoiceDetails.invoiceDate".to_string(), raw.invoice_date);

        if let Some(no) = &invoice_no {
            // the invoice number becomes a file name
            if no.trim().is_empty() {
                self.reject("invoiceDetails.invoiceNo".to_string(), "must not be empty");
            } else if no.contains(['/', '\\']) || no.contains("..") || no.chars().any(char::is_control)
            {
                self.reject(
                    "invoiceDetails.invoiceNo".to_string(),
                    "must not contain path separators, `..` or control characters",
                );
            }
        }

        Some(InvoiceInfo {
            invoice_no: invoice_no?,
            invoice_date: invoice_date?,
        })
    }

    fn line_item(&mut self, index: usize, raw: RawLineItem) -> Option<LineItem> {
        let path = |field: &str| format!("items[{index}].{field}");

        let description = self.text(path("description"), raw.description);
        let unit_price = self.field(path("unitPrice"), raw.unit_price);
        let quantity = self.field(path("quantity"), raw.quantity);
        let discount = self.field(path("discount"), raw.discount);

        let quantity = quantity.and_then(|q| {
            let whole = q.fract().is_zero().then(|| q.to_u32()).flatten();
            if whole.is_none() {
                self.reject(path("quantity"), "must be a whole number of at least 0");
            }
            whole
        });
        if discount.is_some_and(|d| d.is_sign_negative() && !d.is_zero()) {
            self.reject(path("discount"), "must not be negative");
        }

        let item = LineItem {
            description: description?,
            unit_price: unit_price?,
            quantity: quantity?,
            discount: discount?,
        };
        if item.net_amount().is_none() {
            self.reject(path("unitPrice"), "net amount is out of range");
        }
        Some(item)
    }

    fn items(&mut self, raw: Option<Vec<RawLineItem>>) -> Option<Vec<LineItem>> {
        let raw = self.field("items".to_string(), raw)?;
        let items: Vec<Option<LineItem>> = raw
            .into_iter()
            .enumerate()
            .map(|(i, item)| self.line_item(i, item))
            .collect();
        items.into_iter().collect()
    }

    fn finish(self, request: Option<InvoiceRequest>) -> Result<InvoiceRequest, RequestError> {
        if !self.missing.is_empty() {
            return Err(RequestError::MissingFields(self.missing));
        }
        if let Some((field, reason)) = self.invalid {
            return Err(RequestError::InvalidField { field, reason });
        }
        request.ok_or(RequestError::MissingFields(Vec::new()))
    }
}

impl RawRequest {
    fn validate(self) -> Result<InvoiceRequest, RequestError> {
        let mut v = Validator::default();

        let seller = v.party("sellerDetails", self.seller_details);
        let billing = v.party("billingDetails", self.billing_details);
        let shipping = v.party("shippingDetails", self.shipping_details);
        let order = v.order(self.order_details);
        let invoice = v.invoice(self.invoice_details);
        let place_of_supply = v.text("placeOfSupply".to_string(), self.place_of_supply);
        let place_of_delivery = v.text("placeOfDelivery".to_string(), self.place_of_delivery);
        let reverse_charge = v.text("reverseCharge".to_string(), self.reverse_charge);
        let items = v.items(self.items);

        let request = (|| {
            Some(InvoiceRequest {
                seller: seller?,
                billing: billing?,
                shipping: shipping?,
                order: order?,
                invoice: invoice?,
                place_of_supply: place_of_supply?,
                place_of_delivery: place_of_delivery?,
                reverse_charge: reverse_charge?,
                items: items?,
            })
        })();
        v.finish(request)
    }
}
