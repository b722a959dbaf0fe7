//! # Code Generation
//!
//! Converts IR programs to ESC/POS protocol bytes.

use std::fmt::Write as _;
use std::ops::Deref;

use super::ops::{Op, Program};
use crate::protocol::{commands, text};

/// The complete command stream for one ticket.
///
/// Built once per print request and never modified afterwards. Derefs to
/// `[u8]` so it can be handed straight to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSequence {
    bytes: Box<[u8]>,
}

impl CommandSequence {
    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    /// Lowercase hex dump with one space between bytes, for diagnostics.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 3);
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02x}", byte);
        }
        out
    }
}

impl From<Vec<u8>> for CommandSequence {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl Deref for CommandSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for CommandSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Program {
    /// Compile the IR program to ESC/POS bytes.
    ///
    /// Every op becomes exactly one protocol fragment, appended in op order.
    pub fn to_bytes(&self) -> CommandSequence {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => {
                    out.extend(commands::init());
                }
                Op::Cut => {
                    out.extend(commands::cut());
                }

                // ===== Style Changes =====
                Op::SetAlign(align) => {
                    out.extend(text::align(*align));
                }
                Op::SetBold(enabled) => {
                    if *enabled {
                        out.extend(text::bold_on());
                    } else {
                        out.extend(text::bold_off());
                    }
                }
                Op::SetSize(size) => {
                    out.extend(text::size(*size));
                }

                // ===== Content =====
                Op::Text(s) => {
                    out.extend(text::encode_text(s));
                }
                Op::Newline => {
                    out.push(commands::LF);
                }
                Op::Raw(bytes) => {
                    out.extend(bytes);
                }
            }
        }

        out.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::{Alignment, CharSize};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codegen_follows_op_order() {
        let program: Program = vec![
            Op::Init,
            Op::SetAlign(Alignment::Center),
            Op::SetBold(true),
            Op::SetSize(CharSize::Double),
            Op::Text("HI".into()),
            Op::Newline,
            Op::SetSize(CharSize::Normal),
            Op::SetBold(false),
            Op::Cut,
        ]
        .into_iter()
        .collect();

        assert_eq!(
            program.to_bytes().into_vec(),
            vec![
                0x1B, 0x40, // init
                0x1B, 0x61, 0x01, // center
                0x1B, 0x45, 0x01, // bold on
                0x1D, 0x21, 0x11, // double
                b'H', b'I', 0x0A, //
                0x1D, 0x21, 0x00, // normal
                0x1B, 0x45, 0x00, // bold off
                0x1D, 0x56, 0x42, 0x00, // cut
            ]
        );
    }

    #[test]
    fn test_raw_passthrough() {
        let program: Program = vec![Op::Raw(vec![0x10, 0x14, 0x01])].into_iter().collect();
        assert_eq!(program.to_bytes().as_bytes(), &[0x10, 0x14, 0x01]);
    }

    #[test]
    fn test_empty_program() {
        assert!(Program::new().to_bytes().is_empty());
    }

    #[test]
    fn test_hex_dump() {
        let seq = CommandSequence::from(vec![0x1B, 0x40, 0x0A]);
        assert_eq!(seq.to_hex(), "1b 40 0a");
        assert_eq!(CommandSequence::from(Vec::new()).to_hex(), "");
    }
}
