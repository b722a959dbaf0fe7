//! # Error Types
//!
//! This module defines error types used throughout the ticketera library.

use std::io;

use thiserror::Error;

/// Main error type for ticketera operations
#[derive(Debug, Error)]
pub enum TicketeraError {
    /// A send was attempted while no connection is active.
    #[error("Printer not connected")]
    NotConnected,

    /// A chunk write was rejected by the transport. Earlier chunks were
    /// already delivered to the device.
    #[error("Write failed on chunk {chunk} after {bytes_sent} bytes: {source}")]
    TransportWrite {
        chunk: usize,
        bytes_sent: usize,
        #[source]
        source: io::Error,
    },

    /// The link dropped while writing. The handle is now disconnected.
    #[error("Connection lost on chunk {chunk} after {bytes_sent} bytes: {source}")]
    ConnectionLost {
        chunk: usize,
        bytes_sent: usize,
        #[source]
        source: io::Error,
    },

    /// Transport-level errors (connect, open, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Sale record rejected before printing
    #[error("Invalid sale: {0}")]
    InvalidSale(String),

    /// Bad settings or write options
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TicketeraError {
    /// Number of bytes that reached the device before a write failure.
    ///
    /// `None` for errors that happen before any byte is sent.
    pub fn bytes_sent(&self) -> Option<usize> {
        match self {
            Self::TransportWrite { bytes_sent, .. } | Self::ConnectionLost { bytes_sent, .. } => {
                Some(*bytes_sent)
            }
            _ => None,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TicketeraError>;
