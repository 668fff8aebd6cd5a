//! Document rendering: pure string transforms from an assembled order or a
//! product list to HTML. Templates are external assets holding literal
//! placeholder tokens; this module owns only the substitution logic. Given
//! the same inputs and template bytes the output is byte-for-byte identical,
//! which keeps the PDF and e-mail paths testable.

pub mod money;
pub mod templates;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Customer, LineItem, Order, Product};

pub use money::format_brl;
pub use templates::{TemplateStore, ORDER_TEMPLATE, PRICE_LIST_TEMPLATE};

/// Date format used throughout quote documents.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// An order joined with its customer and the product behind each line item,
/// ready for rendering. The customer is optional: a quote whose customer was
/// deleted afterwards still renders, with the name left blank.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDocument {
    pub order: Order,
    pub customer: Option<Customer>,
    pub items: Vec<DocumentLineItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentLineItem {
    pub product: Product,
    pub item: LineItem,
}

impl OrderDocument {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|line| line.item.line_total()).sum()
    }
}

/// Renders the quote document by substituting the named placeholders in the
/// order template: `{{CustomerName}}`, `{{ItemRows}}`, `{{Total}}` and
/// `{{DateExpiration}}`.
pub fn render_order_document(document: &OrderDocument, template: &str) -> String {
    let customer_name = document
        .customer
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("");

    let mut rows = String::new();
    for line in &document.items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            line.product.code,
            escape_html(&line.product.name),
            line.item.quantity,
            format_brl(line.item.unit_price),
            format_brl(line.item.line_total()),
        ));
    }

    template
        .replace("{{CustomerName}}", &escape_html(customer_name))
        .replace("{{ItemRows}}", rows.trim_end())
        .replace("{{Total}}", &format_brl(document.total()))
        .replace("{{DateExpiration}}", &format_date(document.order.expires_at))
}

/// Renders the price list: one row per product (code, name, formatted price)
/// substituted into the `{{ProductList}}` placeholder.
pub fn render_price_list(products: &[Product], template: &str) -> String {
    let mut rows = String::new();
    for product in products {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            product.code,
            escape_html(&product.name),
            format_brl(product.price),
        ));
    }

    template.replace("{{ProductList}}", rows.trim_end())
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
