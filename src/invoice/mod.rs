//! The invoice data carried by one generation request.
//!
//! Requests are decoded from JSON (see [InvoiceRequest::from_json] and
//! [InvoiceRequest::from_form_fields]) and validated in one pass, so that a request
//! which reaches layout is guaranteed to have every field the invoice prints.

mod decode;

use rust_decimal::Decimal;

/// A seller, billing or shipping party
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub state_code: Option<String>,
    pub pan: Option<String>,
    pub gst: Option<String>,
}

impl Party {
    /// Address, city, state and pincode joined into one line
    pub fn address_line(&self) -> String {
        [
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.pincode.as_str(),
        ]
        .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderInfo {
    pub order_no: String,
    pub order_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceInfo {
    /// Also names the stored artifact
    pub invoice_no: String,
    pub invoice_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
}

impl LineItem {
    /// `unit_price * quantity - discount`, computed exactly. `None` when the result
    /// doesn't fit in a [Decimal]; decoded requests never contain such an item.
    pub fn net_amount(&self) -> Option<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))?
            .checked_sub(self.discount)
    }
}

/// Everything needed to lay out one invoice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceRequest {
    pub seller: Party,
    pub billing: Party,
    pub shipping: Party,
    pub order: OrderInfo,
    pub invoice: InvoiceInfo,
    pub place_of_supply: String,
    pub place_of_delivery: String,
    /// Printed exactly as received
    pub reverse_charge: String,
    /// Rendered in this order
    pub items: Vec<LineItem>,
}

/// Decimal-to-text conversion used for every amount on the invoice: no currency
/// symbol, no trailing zeros, no fixed number of decimal places.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn net_amount_is_exact() {
        let item = LineItem {
            description: "Widget".into(),
            unit_price: dec("10.0"),
            quantity: 3,
            discount: dec("1.5"),
        };
        assert_eq!(item.net_amount(), Some(dec("28.5")));
        assert_eq!(item.net_amount().map(format_amount).as_deref(), Some("28.5"));

        // binary floating point would give 0.30000000000000004 here
        let item = LineItem {
            description: "Cents".into(),
            unit_price: dec("0.1"),
            quantity: 3,
            discount: dec("0"),
        };
        assert_eq!(item.net_amount().map(format_amount).as_deref(), Some("0.3"));
    }

    #[test]
    fn net_amount_overflow_is_none() {
        let item = LineItem {
            description: "Bulk".into(),
            unit_price: Decimal::MAX,
            quantity: 2,
            discount: dec("0"),
        };
        assert_eq!(item.net_amount(), None);

        let item = LineItem {
            description: "Rebate".into(),
            unit_price: dec("0"),
            quantity: 1,
            discount: Decimal::MAX,
        };
        assert_eq!(item.net_amount(), Some(-Decimal::MAX));
    }

    #[test]
    fn amounts_drop_trailing_zeros() {
        assert_eq!(format_amount(dec("10.00")), "10");
        assert_eq!(format_amount(dec("0")), "0");
        assert_eq!(format_amount(dec("-2.50")), "-2.5");
    }

    #[test]
    fn address_line_joins_with_commas() {
        let party = Party {
            name: "Acme".into(),
            address: "12 Main Road".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            pincode: "411001".into(),
            state_code: None,
            pan: None,
            gst: None,
        };
        assert_eq!(party.address_line(), "12 Main Road, Pune, Maharashtra, 411001");
    }
}
