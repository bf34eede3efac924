//! # Invoice Renderer
//!
//! Produces a formatted, human-readable invoice from a completed sale, its
//! line items and the optional customer.
//!
//! Rendering is pure: the same sale, items and customer always produce the
//! same document, and nothing here touches domain data. The app layer hands
//! the rendered text to the print/export surface and persists it under a
//! file name derived from the sale identifier.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          MOONLIGHT SCENT                                │
//! │                     (address lines, phone)                              │
//! │  Invoice No : 9E107D9D        ← first 8 chars of sale id, uppercased    │
//! │  Date/Time  : from the sale timestamp                                   │
//! │  Payment    : Cash | Transfer | Card                                    │
//! │  Billed To  : customer, or "Walk-in Customer"                           │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  Item                              Qty    Unit Price      Subtotal      │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  TOTAL row, always equal to Sale.total_cents                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Customer, PaymentMethod, Sale, SaleItem};

/// Rendered line width of the invoice document.
const WIDTH: usize = 72;

/// Business identity printed in the invoice header and used by the
/// customer reminder message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInfo {
    /// Trading name.
    pub name: String,

    /// Address lines, printed in order under the name.
    pub address_lines: Vec<String>,

    /// Contact phone, if any.
    pub phone: Option<String>,
}

/// Derives the invoice number from a sale identifier: the first eight
/// characters, uppercased. Deterministic, so re-rendering a sale always
/// yields the same number.
pub fn invoice_number(sale_id: &str) -> String {
    sale_id.chars().take(8).collect::<String>().to_uppercase()
}

/// Customer details as printed on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl From<&Customer> for InvoiceCustomer {
    fn from(customer: &Customer) -> Self {
        InvoiceCustomer {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
        }
    }
}

/// One row of the line-item table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A fully assembled invoice, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub business: BusinessInfo,
    pub issued_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    /// Absent for walk-in sales.
    pub customer: Option<InvoiceCustomer>,
    pub lines: Vec<InvoiceLine>,
    /// Copied from the persisted sale; equals the sum of line subtotals.
    pub total: Money,
}

impl Invoice {
    /// Assembles an invoice from a persisted sale and its line items.
    ///
    /// Line names come from the items' name snapshots, so the document
    /// reflects the products as they were sold.
    pub fn from_sale(
        business: BusinessInfo,
        sale: &Sale,
        items: &[SaleItem],
        customer: Option<&Customer>,
    ) -> Self {
        Invoice {
            number: invoice_number(&sale.id),
            business,
            issued_at: sale.created_at,
            payment_method: sale.payment_method,
            customer: customer.map(InvoiceCustomer::from),
            lines: items
                .iter()
                .map(|item| InvoiceLine {
                    name: item.name_snapshot.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price(),
                    subtotal: item.subtotal(),
                })
                .collect(),
            total: sale.total(),
        }
    }

    /// File name for the downloadable artifact, deterministic from the
    /// sale identifier: `invoice-9E107D9D.txt`.
    pub fn file_name(&self) -> String {
        format!("invoice-{}.txt", self.number)
    }

    /// Renders the invoice as plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(WIDTH);
        let thin_rule = "-".repeat(WIDTH);

        // Business identity header, centered.
        out.push_str(&rule);
        out.push('\n');
        let _ = writeln!(out, "{:^WIDTH$}", self.business.name.to_uppercase());
        for line in &self.business.address_lines {
            let _ = writeln!(out, "{:^WIDTH$}", line);
        }
        if let Some(phone) = &self.business.phone {
            let _ = writeln!(out, "{:^WIDTH$}", format!("Tel: {}", phone));
        }
        out.push_str(&rule);
        out.push('\n');

        // Sale metadata.
        let _ = writeln!(out, "Invoice No : {}", self.number);
        let _ = writeln!(out, "Date       : {}", self.issued_at.format("%d/%m/%Y"));
        let _ = writeln!(out, "Time       : {}", self.issued_at.format("%I:%M %p"));
        let _ = writeln!(out, "Payment    : {}", self.payment_method);
        match &self.customer {
            Some(c) => {
                let _ = writeln!(out, "Billed To  : {} ({})", c.name, c.phone);
                if let Some(email) = &c.email {
                    let _ = writeln!(out, "             {}", email);
                }
            }
            None => {
                let _ = writeln!(out, "Billed To  : Walk-in Customer");
            }
        }

        // Line-item table.
        out.push_str(&thin_rule);
        out.push('\n');
        let _ = writeln!(
            out,
            "{:<34} {:>5} {:>15} {:>15}",
            "Item", "Qty", "Unit Price", "Subtotal"
        );
        out.push_str(&thin_rule);
        out.push('\n');
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{:<34} {:>5} {:>15} {:>15}",
                truncate(&line.name, 34),
                line.quantity,
                line.unit_price.to_string(),
                line.subtotal.to_string()
            );
        }
        out.push_str(&thin_rule);
        out.push('\n');

        // Total row: by construction equal to the persisted sale total.
        let _ = writeln!(out, "{:<40} {:>31}", "TOTAL", self.total.to_string());
        out.push_str(&rule);
        out.push('\n');
        out.push_str("Thank you for your patronage!\n");

        out
    }
}

/// Truncates a name to fit the item column, marking the cut with an
/// ellipsis character.
fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn business() -> BusinessInfo {
        BusinessInfo {
            name: "Moonlight Scent".to_string(),
            address_lines: vec!["12 Adeola Odeku Street".to_string(), "Lagos".to_string()],
            phone: Some("+234 803 555 0001".to_string()),
        }
    }

    fn sale_with_items() -> (Sale, Vec<SaleItem>) {
        let created_at = Utc.with_ymd_and_hms(2026, 8, 6, 14, 15, 0).unwrap();
        let sale = Sale {
            id: "9e107d9d-0a2b-4c3d-8e4f-5a6b7c8d9e0f".to_string(),
            customer_id: None,
            total_cents: 1_600_000,
            payment_method: PaymentMethod::Cash,
            created_at,
        };
        let items = vec![
            SaleItem {
                id: "item-1".to_string(),
                sale_id: sale.id.clone(),
                product_id: "prod-1".to_string(),
                name_snapshot: "Midnight Rose Perfume".to_string(),
                quantity: 1,
                unit_price_cents: 900_000,
                subtotal_cents: 900_000,
                created_at,
            },
            SaleItem {
                id: "item-2".to_string(),
                sale_id: sale.id.clone(),
                product_id: "prod-2".to_string(),
                name_snapshot: "Amber Oud Body Oil".to_string(),
                quantity: 2,
                unit_price_cents: 350_000,
                subtotal_cents: 700_000,
                created_at,
            },
        ];
        (sale, items)
    }

    #[test]
    fn test_invoice_number_first_eight_uppercased() {
        assert_eq!(
            invoice_number("9e107d9d-0a2b-4c3d-8e4f-5a6b7c8d9e0f"),
            "9E107D9D"
        );
        assert_eq!(invoice_number("abc"), "ABC");
    }

    #[test]
    fn test_total_row_matches_sale_total() {
        let (sale, items) = sale_with_items();
        let invoice = Invoice::from_sale(business(), &sale, &items, None);

        // Round-trip: the rendered total row carries exactly the persisted
        // sale total, and the line subtotals sum to it.
        assert_eq!(invoice.total, sale.total());
        let line_sum: Money = invoice.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(line_sum, sale.total());

        let text = invoice.render_text();
        assert!(text.contains("TOTAL"));
        assert!(text.contains("₦16,000.00"));
    }

    #[test]
    fn test_walk_in_customer_rendering() {
        let (sale, items) = sale_with_items();
        let invoice = Invoice::from_sale(business(), &sale, &items, None);
        let text = invoice.render_text();

        assert!(text.contains("Walk-in Customer"));
        assert!(text.contains("MOONLIGHT SCENT"));
        assert!(text.contains("Invoice No : 9E107D9D"));
        assert!(text.contains("Payment    : Cash"));
    }

    #[test]
    fn test_named_customer_rendering() {
        let (sale, items) = sale_with_items();
        let customer = Customer {
            id: "cust-1".to_string(),
            name: "Ada Obi".to_string(),
            phone: "+234 803 555 1234".to_string(),
            email: Some("ada@example.com".to_string()),
            credit_limit_cents: 5_000_000,
            created_at: Utc::now(),
        };
        let invoice = Invoice::from_sale(business(), &sale, &items, Some(&customer));
        let text = invoice.render_text();

        assert!(text.contains("Ada Obi"));
        assert!(text.contains("ada@example.com"));
        assert!(!text.contains("Walk-in Customer"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let (sale, items) = sale_with_items();
        let invoice = Invoice::from_sale(business(), &sale, &items, None);

        assert_eq!(invoice.render_text(), invoice.render_text());
    }

    #[test]
    fn test_file_name_deterministic() {
        let (sale, items) = sale_with_items();
        let invoice = Invoice::from_sale(business(), &sale, &items, None);

        assert_eq!(invoice.file_name(), "invoice-9E107D9D.txt");
    }
}
