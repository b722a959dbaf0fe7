//! # Printer Transport Layer
//!
//! Moves a finished command stream to the printer.
//!
//! ## Pieces
//!
//! - [`Link`]: one open channel to a paired printer. Each call to
//!   [`Link::write_chunk`] is one bounded write (a BLE characteristic
//!   write, or one `write` on an RFCOMM TTY).
//! - [`Connector`]: knows how to open a [`Link`] for one printer. Pairing
//!   and service discovery live behind it.
//! - [`ConnectionHandle`]: the single active connection, with its
//!   `Disconnected → Connecting → Connected` lifecycle.
//! - [`send_ticket`]: streams a ticket over a connected handle in small
//!   chunks with a pause between them.
//!
//! ## Available Connectors
//!
//! - [`rfcomm`]: Bluetooth Serial Port Profile via a bound RFCOMM TTY (Linux)
//! - [`memory`]: in-memory recorder for dry runs and tests

pub mod connection;
pub mod memory;
pub mod rfcomm;
pub mod writer;

use std::io;

use async_trait::async_trait;

pub use connection::{ConnectionHandle, ConnectionState, DEFAULT_CONNECT_TIMEOUT};
pub use memory::{MemoryConnector, MemoryLink};
pub use rfcomm::RfcommConnector;
pub use writer::{DEFAULT_CHUNK_DELAY, DEFAULT_CHUNK_SIZE, SendReport, WriteOptions, send_ticket};

/// An open channel to one printer.
#[async_trait]
pub trait Link: Send {
    /// Write one chunk. The chunk is never longer than the configured
    /// chunk size.
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Close the channel. Called once on explicit disconnect.
    async fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Opens links to one printer.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Human-readable target, e.g. `/dev/rfcomm0`.
    fn describe(&self) -> String;

    /// Pair (if needed) and open the write channel.
    async fn connect(&self) -> io::Result<Box<dyn Link>>;
}

/// Whether an I/O error means the link itself is gone, as opposed to a
/// single rejected write.
pub fn is_link_lost(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_lost_kinds() {
        assert!(is_link_lost(&io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(is_link_lost(&io::Error::from(io::ErrorKind::NotConnected)));
        assert!(!is_link_lost(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(!is_link_lost(&io::Error::other("rejected")));
    }
}
