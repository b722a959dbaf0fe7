//! Server state and configuration.

use tokio::sync::Mutex;

use crate::error::Result;
use crate::settings::Settings;
use crate::ticket::TicketLayout;
use crate::transport::{ConnectionHandle, WriteOptions};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Printer, ticket and chunking settings
    pub settings: Settings,
}

/// Application state shared across handlers.
pub struct AppState {
    /// The one printer connection. Handlers hold the lock for a whole
    /// print so sends never interleave.
    pub connection: Mutex<ConnectionHandle>,
    pub layout: TicketLayout,
    pub write_options: WriteOptions,
}

impl AppState {
    pub fn new(connection: ConnectionHandle, layout: TicketLayout, write_options: WriteOptions) -> Self {
        Self {
            connection: Mutex::new(connection),
            layout,
            write_options,
        }
    }

    /// State for the configured RFCOMM device.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(
            settings.connection(),
            settings.ticket_layout()?,
            settings.write_options()?,
        ))
    }
}
