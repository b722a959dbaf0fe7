//! # Layout Components
//!
//! Separators, blank lines and raw escape hatches.

use super::Component;
use crate::ir::Op;

/// Default separator width: a 58mm printer's 32 columns.
pub const DEFAULT_COLUMNS: usize = 32;

/// Divider style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerStyle {
    /// Dashed line (default): --------
    #[default]
    Dashed,
    /// Equals line: ========
    Equals,
}

/// A horizontal divider line.
///
/// The divider keeps whatever alignment is active; at full width it looks
/// the same either way.
///
/// ## Example
///
/// ```
/// use ticketera::components::{Divider, DividerStyle};
///
/// let dashed = Divider::dashed();
/// let equals = Divider::new(DividerStyle::Equals).width(48);
/// ```
pub struct Divider {
    style: DividerStyle,
    width: usize,
}

impl Divider {
    /// Create a divider with a specific style.
    pub fn new(style: DividerStyle) -> Self {
        Self {
            style,
            width: DEFAULT_COLUMNS,
        }
    }

    /// Create a dashed divider.
    pub fn dashed() -> Self {
        Self::new(DividerStyle::Dashed)
    }

    /// Create an equals-sign divider.
    pub fn equals() -> Self {
        Self::new(DividerStyle::Equals)
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::dashed()
    }
}

impl Component for Divider {
    fn emit(&self, ops: &mut Vec<Op>) {
        let line = match self.style {
            DividerStyle::Dashed => "-".repeat(self.width),
            DividerStyle::Equals => "=".repeat(self.width),
        };
        ops.push(Op::Text(line));
        ops.push(Op::Newline);
    }
}

/// One or more empty lines (bare line feeds).
pub struct BlankLines {
    count: usize,
}

impl BlankLines {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Default for BlankLines {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Component for BlankLines {
    fn emit(&self, ops: &mut Vec<Op>) {
        for _ in 0..self.count {
            ops.push(Op::Newline);
        }
    }
}

/// A raw byte string or a single op - escape hatch for direct protocol access.
///
/// ## Example
///
/// ```
/// use ticketera::components::Raw;
/// use ticketera::ir::Op;
/// use ticketera::protocol::text::Alignment;
///
/// // From raw bytes
/// let raw = Raw::bytes(vec![0x1B, 0x40]);
///
/// // A single op
/// let center = Raw::op(Op::SetAlign(Alignment::Center));
/// ```
pub struct Raw {
    op: Op,
}

impl Raw {
    /// Create from raw bytes.
    pub fn bytes(data: Vec<u8>) -> Self {
        Self::op(Op::Raw(data))
    }

    /// Create a single op.
    pub fn op(op: Op) -> Self {
        Self { op }
    }
}

impl Component for Raw {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(self.op.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divider_default_width() {
        let mut ops = Vec::new();
        Divider::equals().emit(&mut ops);
        assert_eq!(ops, vec![Op::Text("=".repeat(32)), Op::Newline]);
    }

    #[test]
    fn test_divider_custom_width() {
        let mut ops = Vec::new();
        Divider::dashed().width(5).emit(&mut ops);
        assert_eq!(ops[0], Op::Text("-----".into()));
    }

    #[test]
    fn test_blank_lines() {
        let mut ops = Vec::new();
        BlankLines::new(3).emit(&mut ops);
        assert_eq!(ops, vec![Op::Newline; 3]);

        let mut none = Vec::new();
        BlankLines::new(0).emit(&mut none);
        assert!(none.is_empty());
    }

    #[test]
    fn test_raw_bytes() {
        let mut ops = Vec::new();
        Raw::bytes(vec![0x1B, 0x40]).emit(&mut ops);
        assert_eq!(ops, vec![Op::Raw(vec![0x1B, 0x40])]);
    }
}
