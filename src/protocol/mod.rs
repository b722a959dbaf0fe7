//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS subset used by sale tickets.
//!
//! ## Module Structure
//!
//! - [`commands`]: Init, cut, feed and the named command table
//! - [`text`]: Alignment, bold, character size and the text encoder
//!
//! ## Usage Example
//!
//! ```
//! use ticketera::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend(text::bold_on());
//! data.extend(text::encode_text("RECEIPT\n"));
//! data.extend(text::bold_off());
//! data.extend(commands::cut());
//!
//! // Send `data` to the printer via a transport...
//! ```

pub mod commands;
pub mod text;
