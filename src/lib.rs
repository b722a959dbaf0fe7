//! # Ticketera - Sale Tickets for Bluetooth Thermal Printers
//!
//! Ticketera turns completed point-of-sale transactions into ESC/POS
//! command streams and sends them to a paired Bluetooth receipt printer.
//! It provides:
//!
//! - **Protocol implementation**: the ESC/POS command subset tickets use
//! - **Components**: declarative ticket building blocks over an inspectable IR
//! - **Ticket builder**: the fixed sale ticket layout
//! - **Transport**: a connection state machine and a chunked, paced writer
//! - **Print service**: an HTTP API for the point-of-sale front end
//!
//! ## Quick Start
//!
//! ```no_run
//! use ticketera::{
//!     ticket::{build_ticket, demo_sale},
//!     transport::{ConnectionHandle, RfcommConnector, WriteOptions, send_ticket},
//! };
//!
//! # async fn example() -> ticketera::error::Result<()> {
//! let ticket = build_ticket(&demo_sale());
//!
//! let mut printer = ConnectionHandle::new(RfcommConnector::new("/dev/rfcomm0"));
//! printer.connect().await?;
//! send_ticket(&mut printer, &ticket, &WriteOptions::default()).await?;
//! printer.disconnect().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`ir`] | Ops and byte generation |
//! | [`components`] | Ticket building blocks |
//! | [`ticket`] | Sale records and the ticket layout |
//! | [`preview`] | Plain-text rendering |
//! | [`transport`] | Connections and chunked writes |
//! | [`printer`] | Printer profiles |
//! | [`server`] | HTTP print service |
//! | [`settings`] | Runtime settings |
//! | [`error`] | Error types |

pub mod components;
pub mod error;
pub mod format;
pub mod ir;
pub mod logging;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod settings;
pub mod ticket;
pub mod transport;

// Re-exports for convenience
pub use error::TicketeraError;
pub use printer::PrinterConfig;
pub use ticket::{SaleRecord, build_ticket};
pub use transport::ConnectionHandle;
