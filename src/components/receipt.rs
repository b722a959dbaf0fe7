//! # Ticket Container
//!
//! [`Receipt`] is the root of every ticket: an ordered list of components,
//! optionally finished by a paper cut.

use super::Component;
use crate::ir::Op;

/// Ordered list of ticket components.
///
/// Components emit in insertion order; nothing is reordered or merged, so
/// the bytes follow the order the ticket was written in. A cut, if asked
/// for, always comes last.
///
/// ```
/// use ticketera::components::*;
///
/// let mut ticket = Receipt::new()
///     .child(Text::new("MICHASKA").center().bold())
///     .child(Divider::dashed());
///
/// for (name, qty, price) in [("Tamal", 2.0, 15.0), ("Atole", 1.0, 18.5)] {
///     ticket.push(LineItem::new(name, qty, price, qty * price));
/// }
///
/// let ticket = ticket.child(Total::new(48.5)).cut();
/// assert_eq!(ticket.len(), 5);
/// assert!(ticket.build().ends_with(&[0x1D, 0x56, 0x42, 0x00]));
/// ```
#[derive(Default)]
pub struct Receipt {
    parts: Vec<Box<dyn Component>>,
    cut: bool,
}

impl Receipt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one component.
    pub fn push(&mut self, part: impl Component + 'static) {
        self.parts.push(Box::new(part));
    }

    /// Builder form of [`push`](Self::push).
    pub fn child(mut self, part: impl Component + 'static) -> Self {
        self.push(part);
        self
    }

    /// Append a run of components, e.g. one row per product.
    pub fn children<C: Component + 'static>(mut self, parts: impl IntoIterator<Item = C>) -> Self {
        for part in parts {
            self.push(part);
        }
        self
    }

    /// Finish the ticket with a cut.
    pub fn cut(mut self) -> Self {
        self.cut = true;
        self
    }

    /// Number of components (the cut is not counted).
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Component for Receipt {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.parts.iter().for_each(|part| part.emit(ops));
        if self.cut {
            ops.push(Op::Cut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentExt, Divider, LineItem, Text};

    #[test]
    fn test_empty_ticket_is_only_init() {
        let receipt = Receipt::new();
        assert!(receipt.is_empty());
        assert_eq!(receipt.compile().ops, vec![Op::Init]);
    }

    #[test]
    fn test_cut_is_last_and_single() {
        let ops = Receipt::new()
            .child(Text::new("Vuelva pronto"))
            .cut()
            .cut()
            .compile()
            .ops;

        assert_eq!(ops.last(), Some(&Op::Cut));
        assert_eq!(ops.iter().filter(|op| **op == Op::Cut).count(), 1);
    }

    #[test]
    fn test_product_rows_keep_sale_order() {
        let rows = vec![
            LineItem::new("Tamal", 2.0, 15.0, 30.0),
            LineItem::new("Atole", 1.0, 18.5, 18.5),
        ];
        let ops = Receipt::new().children(rows).compile().ops;

        let names: Vec<&Op> = ops
            .iter()
            .filter(|op| matches!(op, Op::Text(t) if !t.starts_with(' ')))
            .collect();
        assert_eq!(
            names,
            vec![&Op::Text("Tamal".into()), &Op::Text("Atole".into())]
        );
    }

    #[test]
    fn test_push_and_child_mix() {
        let mut receipt = Receipt::new().child(Divider::equals());
        receipt.push(Text::new("PRODUCTOS:"));
        let receipt = receipt.child(Divider::dashed());

        assert_eq!(receipt.len(), 3);
        let ops = receipt.compile().ops;
        assert_eq!(ops[0], Op::Init);
        assert!(ops.contains(&Op::Text("PRODUCTOS:".into())));
    }
}
