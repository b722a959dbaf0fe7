//! # Golden Tests
//!
//! Byte-exact checks of the ticket command stream.
//!
//! The expected streams are spelled out from raw ESC/POS bytes rather than
//! built with the library's own command helpers, so a change to a command
//! constant shows up here as a failure.

use pretty_assertions::assert_eq;
use ticketera::ticket::{LineItem, SaleId, SaleRecord, TicketLayout, build_ticket, build_ticket_with};

// ============================================================================
// RAW COMMAND BYTES
// ============================================================================

const INIT: &[u8] = &[0x1B, 0x40];
const CUT: &[u8] = &[0x1D, 0x56, 0x42, 0x00];
const ALIGN_LEFT: &[u8] = &[0x1B, 0x61, 0x00];
const ALIGN_CENTER: &[u8] = &[0x1B, 0x61, 0x01];
const BOLD_ON: &[u8] = &[0x1B, 0x45, 0x01];
const BOLD_OFF: &[u8] = &[0x1B, 0x45, 0x00];
const SIZE_NORMAL: &[u8] = &[0x1D, 0x21, 0x00];
const SIZE_DOUBLE: &[u8] = &[0x1D, 0x21, 0x11];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn stream(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

fn sample_sale() -> SaleRecord {
    SaleRecord {
        id: SaleId::Number(1042),
        date: "14/10/2026 13:05".to_string(),
        seller: "Ana".to_string(),
        payment_method: "Efectivo".to_string(),
        line_items: vec![
            LineItem::new("Tamal de elote", 2.0, 15.0),
            LineItem::new("Atole de chocolate", 1.0, 18.5),
        ],
        total: 48.5,
    }
}

const EQUALS: &str = "================================\n";
const DASHES: &str = "--------------------------------\n";

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_sample_ticket_bytes() {
    let expected = stream(&[
        INIT,
        // Header
        ALIGN_CENTER,
        BOLD_ON,
        SIZE_DOUBLE,
        b"MICHASKA\n",
        SIZE_NORMAL,
        BOLD_OFF,
        b"Sistema de Punto de Venta\n",
        EQUALS.as_bytes(),
        // Sale details
        ALIGN_LEFT,
        b"Ticket No: 1042\n",
        b"Fecha: 14/10/2026 13:05\n",
        b"Vendedor: Ana\n",
        b"Metodo: Efectivo\n",
        DASHES.as_bytes(),
        // Products
        b"PRODUCTOS:\n",
        b"Tamal de elote\n",
        b"  2 x $15.00 = $30.00\n",
        b"Atole de chocolate\n",
        b"  1 x $18.50 = $18.50\n",
        DASHES.as_bytes(),
        // Total
        BOLD_ON,
        SIZE_DOUBLE,
        b"TOTAL: $48.50\n",
        SIZE_NORMAL,
        BOLD_OFF,
        // Footer
        ALIGN_CENTER,
        "\n¡Gracias por su compra!\n".as_bytes(),
        b"Vuelva pronto\n",
        b"\n\n\n",
        CUT,
    ]);

    assert_eq!(build_ticket(&sample_sale()).into_vec(), expected);
}

#[test]
fn test_ticket_without_items() {
    let sale = SaleRecord {
        id: SaleId::Text("A-7".to_string()),
        date: "01/01/2026 00:00".to_string(),
        seller: "Luis".to_string(),
        payment_method: "Tarjeta".to_string(),
        line_items: vec![],
        total: 0.0,
    };

    let expected = stream(&[
        INIT,
        ALIGN_CENTER,
        BOLD_ON,
        SIZE_DOUBLE,
        b"MICHASKA\n",
        SIZE_NORMAL,
        BOLD_OFF,
        b"Sistema de Punto de Venta\n",
        EQUALS.as_bytes(),
        ALIGN_LEFT,
        b"Ticket No: A-7\n",
        b"Fecha: 01/01/2026 00:00\n",
        b"Vendedor: Luis\n",
        b"Metodo: Tarjeta\n",
        DASHES.as_bytes(),
        b"PRODUCTOS:\n",
        DASHES.as_bytes(),
        BOLD_ON,
        SIZE_DOUBLE,
        b"TOTAL: $0.00\n",
        SIZE_NORMAL,
        BOLD_OFF,
        ALIGN_CENTER,
        "\n¡Gracias por su compra!\n".as_bytes(),
        b"Vuelva pronto\n",
        b"\n\n\n",
        CUT,
    ]);

    assert_eq!(build_ticket(&sale).into_vec(), expected);
}

#[test]
fn test_text_is_utf8_not_transliterated() {
    let mut sale = sample_sale();
    sale.line_items = vec![LineItem::new("Piña colada ñ", 1.0, 10.0)];
    sale.total = 10.0;

    let bytes = build_ticket(&sale).into_vec();
    let name = "Piña colada ñ\n".as_bytes();
    assert!(bytes.windows(name.len()).any(|w| w == name));
    // "¡" is C2 A1 in UTF-8
    assert!(bytes.windows(2).any(|w| w == [0xC2, 0xA1]));
}

#[test]
fn test_fractional_quantity_and_rounding() {
    let mut sale = sample_sale();
    sale.line_items = vec![LineItem {
        name: "Queso".to_string(),
        quantity: 0.5,
        unit_price: 120.0,
        subtotal: 60.0,
    }];
    sale.total = 60.004;

    let bytes = build_ticket(&sale).into_vec();
    let detail = b"  0.5 x $120.00 = $60.00\n";
    let total = b"TOTAL: $60.00\n";
    assert!(bytes.windows(detail.len()).any(|w| w == detail));
    assert!(bytes.windows(total.len()).any(|w| w == total));
}

#[test]
fn test_half_cent_rounds_up() {
    let mut sale = sample_sale();
    sale.line_items = vec![LineItem::new("Queso", 0.5, 12.25)];
    sale.total = 6.125;

    let bytes = build_ticket(&sale).into_vec();
    let detail = b"  0.5 x $12.25 = $6.13\n";
    let total = b"TOTAL: $6.13\n";
    assert!(bytes.windows(detail.len()).any(|w| w == detail));
    assert!(bytes.windows(total.len()).any(|w| w == total));
}

#[test]
fn test_ticket_is_deterministic() {
    let sale = sample_sale();
    assert_eq!(build_ticket(&sale), build_ticket(&sale));
}

#[test]
fn test_custom_layout_changes_only_texts() {
    let layout = TicketLayout {
        business_name: "LA ESQUINA".to_string(),
        columns: 48,
        ..Default::default()
    };
    let bytes = build_ticket_with(&sample_sale(), &layout).into_vec();

    let header = stream(&[ALIGN_CENTER, BOLD_ON, SIZE_DOUBLE, b"LA ESQUINA\n"]);
    assert_eq!(&bytes[..2], INIT);
    assert_eq!(&bytes[2..2 + header.len()], header.as_slice());

    let rule = format!("{}\n", "=".repeat(48));
    assert!(bytes.windows(rule.len()).any(|w| w == rule.as_bytes()));
    assert!(bytes.ends_with(&stream(&[b"\n\n\n", CUT])));
}

#[test]
fn test_backend_json_matches_struct() {
    let json = r#"{
        "id": 1042,
        "fecha": "14/10/2026 13:05",
        "vendedor": "Ana",
        "metodo_pago": "Efectivo",
        "productos": [
            {"nombre": "Tamal de elote", "cantidad": 2, "precio_unitario": 15, "subtotal": 30},
            {"nombre": "Atole de chocolate", "cantidad": 1, "precio_unitario": 18.5, "subtotal": 18.5}
        ],
        "total": 48.5
    }"#;

    let sale = SaleRecord::from_json(json).unwrap();
    assert_eq!(build_ticket(&sale), build_ticket(&sample_sale()));
}
