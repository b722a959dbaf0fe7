//! # Printer Configuration
//!
//! Hardware profiles for the Bluetooth receipt printers tickets are sent to.
//!
//! | Profile | Columns | Write size | Chunk delay |
//! |---------|---------|------------|-------------|
//! | generic-58mm | 32 | 20 bytes | 50 ms |
//! | generic-80mm | 48 | 20 bytes | 50 ms |
//!
//! ## Usage
//!
//! ```
//! use ticketera::printer::PrinterConfig;
//!
//! let config = PrinterConfig::GENERIC_58MM;
//! println!("{}: {} columns", config.name, config.columns);
//! ```

use std::time::Duration;

use crate::transport::WriteOptions;

/// # Printer Configuration
///
/// ## Bluetooth Tuning
///
/// - **max_write_len**: Bytes per write. Cheap SPP bridges drop data on
///   writes larger than 20 bytes.
/// - **chunk_delay_ms**: Pause between writes; slow firmware loses data
///   without it. Found by trial, not mandated by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Profile key used on the command line
    pub key: &'static str,

    /// Printer model name
    pub name: &'static str,

    /// Characters per line in the normal font
    pub columns: usize,

    /// Maximum bytes per write
    pub max_write_len: usize,

    /// Delay between writes in milliseconds
    pub chunk_delay_ms: u64,
}

impl PrinterConfig {
    /// # Generic 58mm Bluetooth Printer
    ///
    /// The common pocket printers sold under many brand names. Font A is
    /// 12×24 dots on a 384-dot head, which gives 32 columns.
    pub const GENERIC_58MM: Self = Self {
        key: "generic-58mm",
        name: "Generic 58mm ESC/POS",
        columns: 32,
        max_write_len: 20,
        chunk_delay_ms: 50,
    };

    /// # Generic 80mm Bluetooth Printer
    ///
    /// 576-dot head, 48 columns.
    pub const GENERIC_80MM: Self = Self {
        key: "generic-80mm",
        name: "Generic 80mm ESC/POS",
        columns: 48,
        max_write_len: 20,
        chunk_delay_ms: 50,
    };

    /// Every built-in profile.
    pub fn list() -> &'static [PrinterConfig] {
        &[Self::GENERIC_58MM, Self::GENERIC_80MM]
    }

    /// Look a profile up by key (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::list()
            .iter()
            .find(|c| c.key.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Chunking derived from this profile.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            chunk_size: self.max_write_len,
            chunk_delay: Duration::from_millis(self.chunk_delay_ms),
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::GENERIC_58MM
    }
}

// ============================================================================
// TESTS
// ============================================================================
