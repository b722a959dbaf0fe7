//! # ESC/POS Text Styling Commands
//!
//! Alignment, emphasis and character size, plus the text encoder.
//!
//! | Style | Command | Bytes |
//! |-------|---------|-------|
//! | Alignment | ESC a n | 1B 61 n |
//! | Bold | ESC E n | 1B 45 n |
//! | Size | GS ! n | 1D 21 n |
//!
//! ## Text Encoding
//!
//! Text is sent as UTF-8. Most receipt printers interpret bytes through a
//! single-byte code page, so characters outside ASCII (`¡`, `ñ`, accented
//! vowels) may print as two unrelated glyphs. The bytes are passed through
//! untouched; code-page mapping is left to the printer's configuration.

use serde::{Deserialize, Serialize};

use super::commands::Command;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Takes effect at the start of the next line and persists until changed
/// or until `ESC @`.
///
/// ## Example
///
/// ```
/// use ticketera::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    Command::align(alignment).bytes().to_vec()
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

/// Convenience function for right alignment
#[inline]
pub fn align_right() -> Vec<u8> {
    align(Alignment::Right)
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Enable Bold/Emphasis (ESC E 1)
#[inline]
pub fn bold_on() -> Vec<u8> {
    Command::BoldOn.bytes().to_vec()
}

/// # Disable Bold/Emphasis (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    Command::BoldOff.bytes().to_vec()
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Character scaling supported by the ticket layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSize {
    /// 1x width, 1x height
    #[default]
    Normal,
    /// 2x width, 2x height
    Double,
}

impl CharSize {
    /// Horizontal multiplier (columns taken per character).
    pub fn width_factor(self) -> usize {
        match self {
            CharSize::Normal => 1,
            CharSize::Double => 2,
        }
    }
}

/// # Select Character Size (GS ! n)
///
/// The high nibble of `n` is the width multiplier minus one, the low
/// nibble the height multiplier minus one. `0x11` is double width and
/// double height.
///
/// ```
/// use ticketera::protocol::text::{size, CharSize};
///
/// assert_eq!(size(CharSize::Double), vec![0x1D, 0x21, 0x11]);
/// assert_eq!(size(CharSize::Normal), vec![0x1D, 0x21, 0x00]);
/// ```
pub fn size(size: CharSize) -> Vec<u8> {
    Command::size(size).bytes().to_vec()
}

// ============================================================================
// TEXT ENCODING
// ============================================================================

/// Encode text for the printer.
///
/// UTF-8, byte for byte. The output is never shorter than the number of
/// characters in `text`.
///
/// ```
/// use ticketera::protocol::text::encode_text;
///
/// assert_eq!(encode_text("OK\n"), b"OK\n".to_vec());
/// assert_eq!(encode_text("¡").len(), 2);
/// ```
#[inline]
pub fn encode_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

// ============================================================================
// TESTS
// ============================================================================
