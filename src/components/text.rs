//! # Text Components
//!
//! Styled text lines, product line items and the total line.

use super::Component;
use crate::format::{format_money, format_quantity};
use crate::ir::Op;
use crate::protocol::text::{Alignment, CharSize};

/// A text component with optional styling.
///
/// ## Example
///
/// ```
/// use ticketera::components::*;
///
/// // Simple text
/// let text = Text::new("Vuelva pronto");
///
/// // Styled text
/// let styled = Text::new("MICHASKA").center().bold().double_size();
/// ```
pub struct Text {
    content: String,
    newline: bool,
    bold: bool,
    size: CharSize,
    alignment: Option<Alignment>,
}

impl Text {
    /// Create a new text line.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            newline: true,
            bold: false,
            size: CharSize::Normal,
            alignment: None,
        }
    }

    /// Create inline text (no trailing newline).
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            newline: false,
            ..Self::new(content)
        }
    }

    /// Make text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Print at double width and double height.
    pub fn double_size(mut self) -> Self {
        self.size = CharSize::Double;
        self
    }

    /// Set alignment before printing.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Left-align.
    pub fn left(self) -> Self {
        self.align(Alignment::Left)
    }

    /// Center-align.
    pub fn center(self) -> Self {
        self.align(Alignment::Center)
    }

    /// Right-align.
    pub fn right(self) -> Self {
        self.align(Alignment::Right)
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        // Alignment persists; emphasis and size are scoped to this line
        if let Some(align) = self.alignment {
            ops.push(Op::SetAlign(align));
        }
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        if self.size != CharSize::Normal {
            ops.push(Op::SetSize(self.size));
        }

        ops.push(Op::Text(self.content.clone()));
        if self.newline {
            ops.push(Op::Newline);
        }

        // Reset styles that were changed (reverse order)
        if self.size != CharSize::Normal {
            ops.push(Op::SetSize(CharSize::Normal));
        }
        if self.bold {
            ops.push(Op::SetBold(false));
        }
    }
}

/// A product line: the name on its own line, then an indented
/// `quantity x price = subtotal` line.
///
/// ```
/// use ticketera::components::LineItem;
///
/// let item = LineItem::new("Atole", 2.0, 12.5, 25.0);
/// ```
pub struct LineItem {
    name: String,
    quantity: f64,
    unit_price: f64,
    subtotal: f64,
    currency: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64, subtotal: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            subtotal,
            currency: "$".to_string(),
        }
    }

    /// Set the currency symbol printed before amounts.
    pub fn currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    /// The indented detail line, without trailing newline.
    pub fn detail_line(&self) -> String {
        format!(
            "  {} x {cur}{} = {cur}{}",
            format_quantity(self.quantity),
            format_money(self.unit_price),
            format_money(self.subtotal),
            cur = self.currency,
        )
    }
}

impl Component for LineItem {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Text(self.name.clone()));
        ops.push(Op::Newline);
        ops.push(Op::Text(self.detail_line()));
        ops.push(Op::Newline);
    }
}

/// The bold, double-size total line.
pub struct Total {
    label: String,
    amount: f64,
    currency: String,
}

impl Total {
    /// Total with the default `TOTAL:` label.
    pub fn new(amount: f64) -> Self {
        Self::labeled("TOTAL:", amount)
    }

    pub fn labeled(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
            currency: "$".to_string(),
        }
    }

    /// Set the currency symbol printed before the amount.
    pub fn currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }
}

impl Component for Total {
    fn emit(&self, ops: &mut Vec<Op>) {
        Text::new(format!(
            "{} {}{}",
            self.label,
            self.currency,
            format_money(self.amount)
        ))
        .bold()
        .double_size()
        .emit(ops);
    }
}
