//! # Intermediate Representation (IR)
//!
//! The IR is a "bytecode" representation that sits between declarative
//! components and raw ESC/POS protocol bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Codegen  │
//! │(declarative)│     │  (Vec<Op>)  │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────┘
//!                            │
//!                            └──► preview (plain text)
//! ```
//!
//! ## Example
//!
//! ```
//! use ticketera::ir::{Op, Program};
//! use ticketera::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Cut);
//!
//! let bytes = program.to_bytes();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;

pub use codegen::CommandSequence;
pub use ops::*;
