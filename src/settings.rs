//! # Settings
//!
//! Everything the CLI and the print server need to know, loadable from a
//! JSON file. Every field has a default, so `{}` is a valid settings file:
//!
//! ```json
//! {
//!   "printer": "generic-58mm",
//!   "device": "/dev/rfcomm0",
//!   "chunk_delay_ms": 80,
//!   "connect_timeout_ms": 5000,
//!   "layout": { "business_name": "LA ESQUINA" }
//! }
//! ```
//!
//! `chunk_size` and `chunk_delay_ms` override the printer profile. The
//! ticket's separator width always follows the profile's column count.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TicketeraError};
use crate::printer::PrinterConfig;
use crate::ticket::TicketLayout;
use crate::transport::rfcomm::DEFAULT_DEVICE;
use crate::transport::{ConnectionHandle, RfcommConnector, WriteOptions};

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Printer profile key (see [`PrinterConfig::list`]).
    pub printer: String,
    /// RFCOMM device path or Bluetooth MAC address.
    pub device: String,
    /// Bytes per write; profile value when unset.
    pub chunk_size: Option<usize>,
    /// Pause between writes; profile value when unset.
    pub chunk_delay_ms: Option<u64>,
    /// Time allowed for opening the connection.
    pub connect_timeout_ms: u64,
    /// Ticket texts.
    pub layout: TicketLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            printer: PrinterConfig::GENERIC_58MM.key.to_string(),
            device: DEFAULT_DEVICE.to_string(),
            chunk_size: None,
            chunk_delay_ms: None,
            connect_timeout_ms: 10_000,
            layout: TicketLayout::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TicketeraError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            TicketeraError::Config(format!("Invalid settings in {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the profile exists and the write options are usable.
    pub fn validate(&self) -> Result<()> {
        self.write_options()?.validate()
    }

    /// The selected printer profile.
    pub fn printer_config(&self) -> Result<PrinterConfig> {
        PrinterConfig::by_name(&self.printer).ok_or_else(|| {
            let known: Vec<&str> = PrinterConfig::list().iter().map(|c| c.key).collect();
            TicketeraError::Config(format!(
                "Unknown printer '{}'. Known printers: {}",
                self.printer,
                known.join(", ")
            ))
        })
    }

    /// Write options: profile defaults with explicit overrides applied.
    pub fn write_options(&self) -> Result<WriteOptions> {
        let mut options = self.printer_config()?.write_options();
        if let Some(size) = self.chunk_size {
            options.chunk_size = size;
        }
        if let Some(ms) = self.chunk_delay_ms {
            options.chunk_delay = Duration::from_millis(ms);
        }
        Ok(options)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Ticket layout sized for the selected printer.
    pub fn ticket_layout(&self) -> Result<TicketLayout> {
        Ok(TicketLayout {
            columns: self.printer_config()?.columns,
            ..self.layout.clone()
        })
    }

    /// A disconnected handle for the configured device.
    pub fn connection(&self) -> ConnectionHandle {
        ConnectionHandle::new(RfcommConnector::new(&self.device))
            .with_connect_timeout(self.connect_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.device, "/dev/rfcomm0");
        assert_eq!(settings.write_options().unwrap(), WriteOptions::default());
        assert_eq!(settings.connect_timeout(), Duration::from_secs(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings: Settings = serde_json::from_str(
            r#"{"printer": "generic-80mm", "chunk_delay_ms": 80, "layout": {"business_name": "X"}}"#,
        )
        .unwrap();
        let options = settings.write_options().unwrap();
        assert_eq!(options.chunk_size, 20);
        assert_eq!(options.chunk_delay, Duration::from_millis(80));

        let layout = settings.ticket_layout().unwrap();
        assert_eq!(layout.columns, 48);
        assert_eq!(layout.business_name, "X");
        assert_eq!(layout.total_label, "TOTAL:");
    }

    #[test]
    fn test_unknown_printer() {
        let settings = Settings {
            printer: "dot-matrix".into(),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(TicketeraError::Config(_))));
    }

    #[test]
    fn test_zero_chunk_size_invalid() {
        let settings = Settings {
            chunk_size: Some(0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/ticketera.json").unwrap_err();
        assert!(matches!(err, TicketeraError::Config(_)));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("ticketera-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"device": "66:22:AA:BB:CC:DD"}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.device, "66:22:AA:BB:CC:DD");
        assert_eq!(settings.connection().describe(), "66:22:AA:BB:CC:DD");
    }
}
