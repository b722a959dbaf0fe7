//! # IR Opcodes
//!
//! The intermediate representation for ticket printing: a flat sequence of
//! opcodes that can be inspected, previewed, and compiled to ESC/POS bytes.
//!
//! ```text
//! Components → IR (inspectable) → Codegen → Bytes
//! ```
//!
//! Each opcode is a single atomic operation. Style changes are individual
//! ops, and codegen never reorders them, so the emitted byte stream follows
//! the op order exactly.

use crate::protocol::text::{Alignment, CharSize};

/// IR opcodes - the "bytecode" for ticket printing.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Feed to the cutter and cut (GS V B 0).
    Cut,

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Enable/disable bold.
    SetBold(bool),

    /// Set character size.
    SetSize(CharSize),

    // ========== Content ==========
    /// Raw text (no trailing newline).
    Text(String),

    /// Line feed (newline).
    Newline,

    /// Raw bytes (direct protocol access).
    Raw(Vec<u8>),
}

/// A compiled IR program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_with_init() {
        let program = Program::with_init();
        assert_eq!(program.len(), 1);
        assert_eq!(program.ops[0], Op::Init);
    }

    #[test]
    fn test_program_push_and_extend() {
        let mut program = Program::new();
        program.push(Op::Init);
        program.extend([Op::SetBold(true), Op::Text("Hola".into())]);
        assert_eq!(program.len(), 3);
        assert_eq!(program.ops[2], Op::Text("Hola".into()));
    }

    #[test]
    fn test_program_from_iter() {
        let program: Program = vec![Op::Init, Op::Cut].into_iter().collect();
        assert_eq!(program.iter().count(), 2);
    }
}
