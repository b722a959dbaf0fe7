//! # Chunked Ticket Writer
//!
//! Low-energy Bluetooth characteristics accept roughly 20 bytes per write,
//! and cheap printer firmware drops data when it arrives too fast. Tickets
//! are therefore written in fixed-size chunks, strictly in order, with a
//! pause between consecutive writes.
//!
//! The protocol is send-only: success means every chunk was accepted by
//! the transport, not that the ticket came out of the printer.
//!
//! ## Failure Semantics
//!
//! The first failed write aborts the ticket. Nothing is retried and
//! nothing is rolled back, so a partially printed ticket is possible; the
//! error reports how many bytes were already sent.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConnectionHandle, is_link_lost};
use crate::error::{Result, TicketeraError};

/// Default chunk size (bytes). Fits a default BLE ATT MTU of 23.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Default pause between chunk writes.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(50);

/// Chunking and pacing for [`send_ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Maximum bytes per write.
    pub chunk_size: usize,
    /// Pause between consecutive writes.
    #[serde(with = "millis")]
    pub chunk_delay: Duration,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }
}

impl WriteOptions {
    /// Reject options that cannot be used for writing.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TicketeraError::Config(
                "chunk size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of writes needed for `len` bytes.
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size.max(1))
    }
}

/// Outcome of a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendReport {
    /// Bytes handed to the transport.
    pub bytes: usize,
    /// Number of writes issued.
    pub chunks: usize,
}

/// Stream a ticket to the printer.
///
/// Fails with [`TicketeraError::NotConnected`] before writing anything if
/// the handle is not connected. A write failure aborts the remaining
/// chunks; if the failure means the link is gone the handle is marked
/// disconnected and [`TicketeraError::ConnectionLost`] is returned,
/// otherwise [`TicketeraError::TransportWrite`].
///
/// Callers must not run two sends on one handle at once; holding
/// `&mut ConnectionHandle` for the whole call enforces that.
pub async fn send_ticket(
    connection: &mut ConnectionHandle,
    ticket: &[u8],
    options: &WriteOptions,
) -> Result<SendReport> {
    options.validate()?;

    let Some(link) = connection.link_mut() else {
        return Err(TicketeraError::NotConnected);
    };

    let total_chunks = options.chunk_count(ticket.len());
    tracing::debug!(
        bytes = ticket.len(),
        chunks = total_chunks,
        chunk_size = options.chunk_size,
        "sending ticket"
    );

    let mut bytes_sent = 0;
    let mut failure = None;

    for (index, chunk) in ticket.chunks(options.chunk_size).enumerate() {
        if index > 0 && !options.chunk_delay.is_zero() {
            tokio::time::sleep(options.chunk_delay).await;
        }

        if let Err(source) = link.write_chunk(chunk).await {
            failure = Some((index, source));
            break;
        }
        bytes_sent += chunk.len();
        tracing::trace!(chunk = index, len = chunk.len(), "chunk written");
    }

    if let Some((chunk, source)) = failure {
        tracing::warn!(chunk, bytes_sent, error = %source, "ticket write aborted");
        if is_link_lost(&source) {
            connection.mark_lost();
            return Err(TicketeraError::ConnectionLost {
                chunk,
                bytes_sent,
                source,
            });
        }
        return Err(TicketeraError::TransportWrite {
            chunk,
            bytes_sent,
            source,
        });
    }

    Ok(SendReport {
        bytes: bytes_sent,
        chunks: total_chunks,
    })
}

/// Serialize a `Duration` as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = WriteOptions::default();
        assert_eq!(options.chunk_size, 20);
        assert_eq!(options.chunk_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_chunk_count() {
        let options = WriteOptions::default();
        assert_eq!(options.chunk_count(0), 0);
        assert_eq!(options.chunk_count(20), 1);
        assert_eq!(options.chunk_count(45), 3);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let options = WriteOptions {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(TicketeraError::Config(_))));
    }

    #[test]
    fn test_options_json_uses_millis() {
        let options: WriteOptions =
            serde_json::from_str(r#"{"chunk_size": 64, "chunk_delay": 5}"#).unwrap();
        assert_eq!(options.chunk_size, 64);
        assert_eq!(options.chunk_delay, Duration::from_millis(5));

        let defaults: WriteOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, WriteOptions::default());
    }
}
