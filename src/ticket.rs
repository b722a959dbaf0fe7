//! # Sale Tickets
//!
//! Turns a [`SaleRecord`] into the printer command stream for its ticket.
//!
//! The ticket layout is fixed:
//!
//! ```text
//!          MICHASKA            ← centered, bold, double size
//!   Sistema de Punto de Venta
//! ================================
//! Ticket No: 1042              ← left aligned from here on
//! Fecha: 14/10/2026 13:05
//! Vendedor: Ana
//! Metodo: Efectivo
//! --------------------------------
//! PRODUCTOS:
//! Tamal de elote
//!   2 x $15.00 = $30.00
//! --------------------------------
//! TOTAL: $30.00                ← bold, double size
//!
//!     ¡Gracias por su compra!  ← centered
//!          Vuelva pronto
//!
//!
//!
//! ✂
//! ```
//!
//! Building is pure: the same record and layout always produce the same
//! bytes. Records are assumed to be validated by the caller; see
//! [`SaleRecord::validate`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::{
    BlankLines, ComponentExt, Divider, LineItem as LineItemRow, Raw, Receipt, Text, Total,
};
use crate::error::{Result, TicketeraError};
use crate::ir::{CommandSequence, Op, Program};
use crate::protocol::text::Alignment;

pub use crate::format::{format_money, format_quantity};

/// Blank lines fed between the closing message and the cut.
pub const TRAILING_FEED_LINES: usize = 3;

/// Largest accepted difference between `total` and the sum of subtotals
/// before a mismatch is reported.
const TOTAL_TOLERANCE: f64 = 0.005;

// ============================================================================
// SALE RECORD
// ============================================================================

/// Sale identifier as sent by the backend: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleId::Number(n) => write!(f, "{}", n),
            SaleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for SaleId {
    fn from(n: i64) -> Self {
        SaleId::Number(n)
    }
}

impl From<&str> for SaleId {
    fn from(s: &str) -> Self {
        SaleId::Text(s.to_string())
    }
}

/// One product line of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "cantidad")]
    pub quantity: f64,
    #[serde(alias = "precio_unitario", alias = "unit_price")]
    pub unit_price: f64,
    pub subtotal: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            subtotal: quantity * unit_price,
        }
    }
}

/// A completed sale, as returned by the backend.
///
/// Accepts both the English field names and the backend's Spanish keys
/// (`fecha`, `vendedor`, `metodo_pago`, `productos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: SaleId,
    #[serde(alias = "fecha")]
    pub date: String,
    #[serde(alias = "vendedor")]
    pub seller: String,
    #[serde(alias = "metodo_pago", alias = "payment_method")]
    pub payment_method: String,
    #[serde(alias = "productos", alias = "line_items")]
    pub line_items: Vec<LineItem>,
    pub total: f64,
}

impl SaleRecord {
    /// Parse a sale from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sum of all line subtotals.
    pub fn subtotal_sum(&self) -> f64 {
        self.line_items.iter().map(|item| item.subtotal).sum()
    }

    /// Check that the record can be printed.
    ///
    /// Rejects non-finite amounts and non-positive quantities. A total that
    /// does not match the subtotals is only logged: the backend owns
    /// pricing and its total is what gets printed.
    pub fn validate(&self) -> Result<()> {
        if !self.total.is_finite() {
            return Err(TicketeraError::InvalidSale(format!(
                "total is not a number: {}",
                self.total
            )));
        }

        for (i, item) in self.line_items.iter().enumerate() {
            if !(item.quantity.is_finite() && item.quantity > 0.0) {
                return Err(TicketeraError::InvalidSale(format!(
                    "item {} ({}): quantity must be positive, got {}",
                    i + 1,
                    item.name,
                    item.quantity
                )));
            }
            if !item.unit_price.is_finite() || !item.subtotal.is_finite() {
                return Err(TicketeraError::InvalidSale(format!(
                    "item {} ({}): price is not a number",
                    i + 1,
                    item.name
                )));
            }
        }

        let sum = self.subtotal_sum();
        if (sum - self.total).abs() > TOTAL_TOLERANCE {
            tracing::warn!(
                sale = %self.id,
                total = self.total,
                subtotals = sum,
                "sale total does not match line subtotals"
            );
        }

        Ok(())
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Fixed texts printed on every ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketLayout {
    pub business_name: String,
    pub subtitle: String,
    pub ticket_label: String,
    pub date_label: String,
    pub seller_label: String,
    pub payment_label: String,
    pub items_label: String,
    pub total_label: String,
    pub currency: String,
    pub thanks: String,
    pub farewell: String,
    /// Separator width in columns.
    pub columns: usize,
}

impl Default for TicketLayout {
    fn default() -> Self {
        Self {
            business_name: "MICHASKA".to_string(),
            subtitle: "Sistema de Punto de Venta".to_string(),
            ticket_label: "Ticket No:".to_string(),
            date_label: "Fecha:".to_string(),
            seller_label: "Vendedor:".to_string(),
            payment_label: "Metodo:".to_string(),
            items_label: "PRODUCTOS:".to_string(),
            total_label: "TOTAL:".to_string(),
            currency: "$".to_string(),
            thanks: "¡Gracias por su compra!".to_string(),
            farewell: "Vuelva pronto".to_string(),
            columns: 32,
        }
    }
}

// ============================================================================
// TICKET BUILDER
// ============================================================================

/// Assemble the ticket as a component tree.
pub fn ticket_receipt(sale: &SaleRecord, layout: &TicketLayout) -> Receipt {
    let items = sale.line_items.iter().map(|item| {
        LineItemRow::new(&item.name, item.quantity, item.unit_price, item.subtotal)
            .currency(&layout.currency)
    });

    Receipt::new()
        // Header
        .child(
            Text::new(&layout.business_name)
                .center()
                .bold()
                .double_size(),
        )
        .child(Text::new(&layout.subtitle))
        .child(Divider::equals().width(layout.columns))
        // Sale details
        .child(Text::new(format!("{} {}", layout.ticket_label, sale.id)).left())
        .child(Text::new(format!("{} {}", layout.date_label, sale.date)))
        .child(Text::new(format!("{} {}", layout.seller_label, sale.seller)))
        .child(Text::new(format!(
            "{} {}",
            layout.payment_label, sale.payment_method
        )))
        .child(Divider::dashed().width(layout.columns))
        // Products
        .child(Text::new(&layout.items_label))
        .children(items)
        .child(Divider::dashed().width(layout.columns))
        // Total
        .child(Total::labeled(&layout.total_label, sale.total).currency(&layout.currency))
        // Footer
        .child(Raw::op(Op::SetAlign(Alignment::Center)))
        .child(BlankLines::new(1))
        .child(Text::new(&layout.thanks))
        .child(Text::new(&layout.farewell))
        .child(BlankLines::new(TRAILING_FEED_LINES))
        .cut()
}

/// The ticket as an IR program (starts with `Init`, ends with `Cut`).
pub fn ticket_program(sale: &SaleRecord, layout: &TicketLayout) -> Program {
    ticket_receipt(sale, layout).compile()
}

/// Build the command stream for a sale with the default layout.
pub fn build_ticket(sale: &SaleRecord) -> CommandSequence {
    build_ticket_with(sale, &TicketLayout::default())
}

/// Build the command stream for a sale with a custom layout.
pub fn build_ticket_with(sale: &SaleRecord, layout: &TicketLayout) -> CommandSequence {
    ticket_program(sale, layout).to_bytes()
}

/// Current local time in the ticket's date format.
pub fn current_datetime() -> String {
    chrono::Local::now().format("%d/%m/%Y %H:%M").to_string()
}

/// A sample sale for test prints.
pub fn demo_sale() -> SaleRecord {
    let line_items = vec![
        LineItem::new("Tamal de elote", 2.0, 15.0),
        LineItem::new("Atole de chocolate", 1.0, 18.5),
        LineItem::new("Champurrado 1L", 1.0, 45.0),
    ];
    let total = line_items.iter().map(|item| item.subtotal).sum();

    SaleRecord {
        id: SaleId::Number(1),
        date: current_datetime(),
        seller: "Caja 1".to_string(),
        payment_method: "Efectivo".to_string(),
        line_items,
        total,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sale(items: Vec<LineItem>) -> SaleRecord {
        let total = items.iter().map(|i| i.subtotal).sum();
        SaleRecord {
            id: SaleId::Number(7),
            date: "01/02/2026 10:00".into(),
            seller: "Ana".into(),
            payment_method: "Tarjeta".into(),
            line_items: items,
            total,
        }
    }

    fn text_ops(program: &Program) -> Vec<String> {
        program
            .iter()
            .filter_map(|op| match op {
                Op::Text(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_program_brackets() {
        let program = ticket_program(&sale(vec![]), &TicketLayout::default());
        assert_eq!(program.ops.first(), Some(&Op::Init));
        assert_eq!(program.ops.last(), Some(&Op::Cut));
    }

    #[test]
    fn test_three_newlines_before_cut() {
        let program = ticket_program(&sale(vec![]), &TicketLayout::default());
        let n = program.len();
        assert_eq!(program.ops[n - 4..n - 1].to_vec(), vec![Op::Newline; 3]);
    }

    #[test]
    fn test_item_lines_in_input_order() {
        let program = ticket_program(
            &sale(vec![
                LineItem::new("Zanahoria", 1.0, 3.0),
                LineItem::new("Arroz", 2.0, 10.0),
            ]),
            &TicketLayout::default(),
        );
        let texts = text_ops(&program);
        let start = texts.iter().position(|t| t == "PRODUCTOS:").unwrap();
        assert_eq!(
            &texts[start + 1..start + 5],
            &[
                "Zanahoria".to_string(),
                "  1 x $3.00 = $3.00".to_string(),
                "Arroz".to_string(),
                "  2 x $10.00 = $20.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_metadata_lines() {
        let texts = text_ops(&ticket_program(&sale(vec![]), &TicketLayout::default()));
        assert!(texts.contains(&"Ticket No: 7".to_string()));
        assert!(texts.contains(&"Fecha: 01/02/2026 10:00".to_string()));
        assert!(texts.contains(&"Vendedor: Ana".to_string()));
        assert!(texts.contains(&"Metodo: Tarjeta".to_string()));
        assert!(texts.contains(&"TOTAL: $0.00".to_string()));
    }

    #[test]
    fn test_custom_layout() {
        let layout = TicketLayout {
            business_name: "LA ESQUINA".into(),
            currency: "€".into(),
            columns: 4,
            ..Default::default()
        };
        let texts = text_ops(&ticket_program(
            &sale(vec![LineItem::new("Pan", 1.0, 1.2)]),
            &layout,
        ));
        assert_eq!(texts[0], "LA ESQUINA");
        assert!(texts.contains(&"====".to_string()));
        assert!(texts.contains(&"  1 x €1.20 = €1.20".to_string()));
        assert!(texts.contains(&"TOTAL: €1.20".to_string()));
    }

    #[test]
    fn test_build_is_deterministic() {
        let s = sale(vec![LineItem::new("Café", 1.0, 22.0)]);
        assert_eq!(build_ticket(&s), build_ticket(&s));
    }

    #[test]
    fn test_sale_id_display() {
        assert_eq!(SaleId::Number(12).to_string(), "12");
        assert_eq!(SaleId::from("V-0012").to_string(), "V-0012");
    }

    #[test]
    fn test_parse_spanish_keys() {
        let json = r#"{
            "id": 15,
            "fecha": "03/03/2026 09:15",
            "vendedor": "Luis",
            "metodo_pago": "Efectivo",
            "productos": [
                {"nombre": "Tamal", "cantidad": 3, "precio_unitario": 15, "subtotal": 45}
            ],
            "total": 45
        }"#;
        let sale = SaleRecord::from_json(json).unwrap();
        assert_eq!(sale.id, SaleId::Number(15));
        assert_eq!(sale.seller, "Luis");
        assert_eq!(sale.line_items[0].unit_price, 15.0);
        assert_eq!(sale.total, 45.0);
    }

    #[test]
    fn test_parse_english_keys_and_string_id() {
        let json = r#"{
            "id": "A-9",
            "date": "d",
            "seller": "s",
            "paymentMethod": "p",
            "lineItems": [{"name": "n", "quantity": 1.5, "unitPrice": 2, "subtotal": 3}],
            "total": 3
        }"#;
        let sale = SaleRecord::from_json(json).unwrap();
        assert_eq!(sale.id, SaleId::Text("A-9".into()));
        assert_eq!(sale.line_items[0].quantity, 1.5);
    }

    #[test]
    fn test_parse_rejects_missing_total() {
        let err = SaleRecord::from_json(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, TicketeraError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut s = sale(vec![LineItem::new("Pan", 1.0, 2.0)]);
        s.line_items[0].quantity = 0.0;
        assert!(matches!(s.validate(), Err(TicketeraError::InvalidSale(_))));
    }

    #[test]
    fn test_validate_rejects_nan_total() {
        let mut s = sale(vec![]);
        s.total = f64::NAN;
        assert!(matches!(s.validate(), Err(TicketeraError::InvalidSale(_))));
    }

    #[test]
    fn test_validate_tolerates_total_mismatch() {
        let mut s = sale(vec![LineItem::new("Pan", 1.0, 2.0)]);
        s.total = 99.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_demo_sale_is_valid() {
        let demo = demo_sale();
        assert!(demo.validate().is_ok());
        assert_eq!(demo.line_items.len(), 3);
        assert!((demo.total - 93.5).abs() < 1e-9);
    }
}
