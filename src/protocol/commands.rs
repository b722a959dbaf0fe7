//! # ESC/POS Printer Control Commands
//!
//! Initialization, paper cut and feed commands for ESC/POS-compatible
//! thermal printers (the common 58mm/80mm Bluetooth receipt printers).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC a n`, `GS ! n`, `GS V m n`
//!
//! The stream has no framing: the firmware consumes command bytes and text
//! bytes as one continuous tape.

use super::text::{Alignment, CharSize};

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size (`GS !`) and cutter control (`GS V`).
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets modes (bold, size, alignment) to
/// their power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use ticketera::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    INIT.to_vec()
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Cut (GS V B 0)
///
/// Feeds paper to the cutter position and cuts. With `n = 0` the printer
/// feeds only the minimum distance needed to clear the last printed line.
///
/// | Format  | Bytes         |
/// |---------|---------------|
/// | ASCII   | GS V B NUL    |
/// | Hex     | 1D 56 42 00   |
///
/// Printers without a cutter ignore the command after feeding.
#[inline]
pub fn cut() -> Vec<u8> {
    CUT.to_vec()
}

// ============================================================================
// COMMAND TABLE
// ============================================================================

const INIT: &[u8] = &[ESC, b'@'];
const CUT: &[u8] = &[GS, b'V', b'B', 0x00];
const ALIGN_LEFT: &[u8] = &[ESC, b'a', 0x00];
const ALIGN_CENTER: &[u8] = &[ESC, b'a', 0x01];
const ALIGN_RIGHT: &[u8] = &[ESC, b'a', 0x02];
const BOLD_ON: &[u8] = &[ESC, b'E', 0x01];
const BOLD_OFF: &[u8] = &[ESC, b'E', 0x00];
const SIZE_NORMAL: &[u8] = &[GS, b'!', 0x00];
const SIZE_DOUBLE: &[u8] = &[GS, b'!', 0x11];

/// Symbolic names for every fixed command sequence a ticket uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Init,
    Cut,
    AlignLeft,
    AlignCenter,
    AlignRight,
    BoldOn,
    BoldOff,
    SizeNormal,
    SizeDouble,
}

impl Command {
    /// Every command, in table order.
    pub const ALL: [Command; 9] = [
        Command::Init,
        Command::Cut,
        Command::AlignLeft,
        Command::AlignCenter,
        Command::AlignRight,
        Command::BoldOn,
        Command::BoldOff,
        Command::SizeNormal,
        Command::SizeDouble,
    ];

    /// The raw byte sequence sent to the printer.
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Command::Init => INIT,
            Command::Cut => CUT,
            Command::AlignLeft => ALIGN_LEFT,
            Command::AlignCenter => ALIGN_CENTER,
            Command::AlignRight => ALIGN_RIGHT,
            Command::BoldOn => BOLD_ON,
            Command::BoldOff => BOLD_OFF,
            Command::SizeNormal => SIZE_NORMAL,
            Command::SizeDouble => SIZE_DOUBLE,
        }
    }

    /// Symbolic name, e.g. `"align_center"`.
    pub const fn name(self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Cut => "cut",
            Command::AlignLeft => "align_left",
            Command::AlignCenter => "align_center",
            Command::AlignRight => "align_right",
            Command::BoldOn => "bold_on",
            Command::BoldOff => "bold_off",
            Command::SizeNormal => "size_normal",
            Command::SizeDouble => "size_double",
        }
    }

    /// Look a command up by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Alignment command for the given alignment.
    pub const fn align(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => Command::AlignLeft,
            Alignment::Center => Command::AlignCenter,
            Alignment::Right => Command::AlignRight,
        }
    }

    /// Character size command for the given size.
    pub const fn size(size: CharSize) -> Self {
        match size {
            CharSize::Normal => Command::SizeNormal,
            CharSize::Double => Command::SizeDouble,
        }
    }
}

/// The whole command table as `(name, bytes)` pairs.
pub fn table() -> impl Iterator<Item = (&'static str, &'static [u8])> {
    Command::ALL.into_iter().map(|c| (c.name(), c.bytes()))
}

// ============================================================================
// TESTS
// ============================================================================
