//! Receipt rendering boundary.
//!
//! The core hands over a structured [`ReceiptDocument`]; renderers turn
//! it into bytes. The HTML renderer here is the built-in default; a PDF
//! renderer would slot in behind the same trait.

use anyhow::Result;

use skyfare_types::api::receipts::{ReceiptDocument, ReceiptKind};

pub trait ReceiptRenderer {
    /// Content type of the rendered bytes.
    fn content_type(&self) -> &'static str;

    fn render(&self, document: &ReceiptDocument) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Default)]
pub struct HtmlReceiptRenderer;

/// Escape text for interpolation into HTML. Passenger names (and any
/// other stored field) are customer-supplied and must never reach the
/// markup raw.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ReceiptRenderer for HtmlReceiptRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn render(&self, document: &ReceiptDocument) -> Result<Vec<u8>> {
        let title = match document.kind {
            ReceiptKind::Purchase => "E-Ticket Receipt",
            ReceiptKind::Cancellation => "Cancellation Receipt",
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
        html.push_str(&format!(
            "<title>{} {}</title></head><body>",
            title,
            escape_html(&document.pnr)
        ));
        html.push_str(&format!("<h1>{}</h1>", title));
        html.push_str(&format!(
            "<p><strong>PNR:</strong> {} &middot; <strong>Reference:</strong> {}</p>",
            escape_html(&document.pnr),
            escape_html(&document.booking_reference)
        ));
        html.push_str(&format!(
            "<p>{} {} &rarr; {} &middot; departs {}</p>",
            escape_html(&document.flight.flight_number),
            escape_html(&document.flight.origin_code),
            escape_html(&document.flight.destination_code),
            document.flight.departure_time.to_rfc3339()
        ));
        if let Some(gate) = &document.flight.gate {
            html.push_str(&format!("<p>Gate {}</p>", escape_html(gate)));
        }

        html.push_str("<table><tr><th>Passenger</th><th>Seat</th><th>Cabin</th><th>Ticket</th></tr>");
        for passenger in &document.passengers {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&passenger.name),
                escape_html(&passenger.seat_number),
                passenger.cabin_class.as_str(),
                escape_html(passenger.ticket_number.as_deref().unwrap_or("-"))
            ));
        }
        html.push_str("</table>");

        html.push_str(&format!("<p><strong>Total:</strong> {}</p>", document.total_fare));
        if let Some(paid) = document.paid_amount {
            html.push_str(&format!("<p><strong>Paid:</strong> {}</p>", paid));
        }
        if let Some(transaction_id) = &document.transaction_id {
            html.push_str(&format!("<p>Transaction {}</p>", escape_html(transaction_id)));
        }
        html.push_str(&format!(
            "<p><small>Issued {}</small></p></body></html>",
            document.issued_at.to_rfc3339()
        ));

        Ok(html.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use skyfare_types::api::receipts::{ReceiptFlight, ReceiptPassenger};
    use skyfare_types::enums::{CabinClass, PaymentMethod};

    fn document() -> ReceiptDocument {
        ReceiptDocument {
            kind: ReceiptKind::Purchase,
            pnr: "X7K2MP".to_string(),
            booking_reference: "SF-AB12CD34".to_string(),
            flight: ReceiptFlight {
                flight_number: "6E123".to_string(),
                airline_code: "6E".to_string(),
                origin_code: "DEL".to_string(),
                destination_code: "BOM".to_string(),
                departure_time: Utc.with_ymd_and_hms(2026, 9, 1, 8, 30, 0).unwrap(),
                arrival_time: Utc.with_ymd_and_hms(2026, 9, 1, 10, 45, 0).unwrap(),
                gate: Some("A12".to_string()),
            },
            passengers: vec![ReceiptPassenger {
                name: "Asha Rao".to_string(),
                seat_number: "12A".to_string(),
                cabin_class: CabinClass::Economy,
                ticket_number: Some("X7K2MP-01".to_string()),
            }],
            total_fare: Decimal::from(5000),
            paid_amount: Some(Decimal::from(5000)),
            payment_method: Some(PaymentMethod::Card),
            transaction_id: Some("txn_abc123".to_string()),
            paid_at: Some(Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()),
            issued_at: Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 5).unwrap(),
        }
    }

    #[test]
    fn test_render_carries_key_fields() {
        let bytes = HtmlReceiptRenderer.render(&document()).unwrap();
        let html = String::from_utf8(bytes).unwrap();

        assert!(html.contains("X7K2MP"));
        assert!(html.contains("SF-AB12CD34"));
        assert!(html.contains("6E123"));
        assert!(html.contains("5000"));
        assert!(html.contains("12A"));
    }

    #[test]
    fn test_cancellation_renders_as_such() {
        let mut doc = document();
        doc.kind = ReceiptKind::Cancellation;
        let html = String::from_utf8(HtmlReceiptRenderer.render(&doc).unwrap()).unwrap();
        assert!(html.contains("Cancellation Receipt"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
        assert_eq!(escape_html("Asha Rao"), "Asha Rao");
    }

    #[test]
    fn test_passenger_name_is_escaped_in_markup() {
        let mut doc = document();
        doc.passengers[0].name = "<script>document.location='//evil'</script>".to_string();

        let html = String::from_utf8(HtmlReceiptRenderer.render(&doc).unwrap()).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
