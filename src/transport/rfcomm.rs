//! # Bluetooth RFCOMM Transport
//!
//! Talks to Bluetooth receipt printers over the Serial Port Profile (SPP)
//! through a bound RFCOMM TTY.
//!
//! ## Bluetooth Setup (Linux)
//!
//! The printer must be paired and bound to an RFCOMM device first:
//!
//! ```bash
//! # 1. Find the printer's Bluetooth address
//! $ bluetoothctl
//! [bluetooth]# scan on
//! # Note the address, e.g., 66:22:XX:XX:XX:XX
//!
//! # 2. Pair with the printer
//! [bluetooth]# pair 66:22:XX:XX:XX:XX
//!
//! # 3. Bind to RFCOMM device
//! $ sudo rfcomm bind 0 66:22:XX:XX:XX:XX
//! # This creates /dev/rfcomm0
//! ```
//!
//! The connector accepts either the device path or the MAC address; a MAC
//! is resolved to its bound `/dev/rfcommN`.
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so binary data is transmitted without
//! modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{Connector, Link};

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Where the printer is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfcommTarget {
    /// A bound TTY, e.g. `/dev/rfcomm0`.
    Device(PathBuf),
    /// A Bluetooth address already bound with `rfcomm bind`.
    Mac(String),
}

impl RfcommTarget {
    /// Interpret a CLI argument: a valid MAC address or a device path.
    pub fn parse(s: &str) -> Self {
        if is_valid_mac(s) {
            RfcommTarget::Mac(s.to_uppercase())
        } else {
            RfcommTarget::Device(PathBuf::from(s))
        }
    }
}

/// # RFCOMM Connector
///
/// ## Example
///
/// ```no_run
/// use ticketera::transport::{ConnectionHandle, RfcommConnector, WriteOptions, send_ticket};
/// use ticketera::ticket::{build_ticket, demo_sale};
///
/// # async fn example() -> Result<(), ticketera::TicketeraError> {
/// let mut printer = ConnectionHandle::new(RfcommConnector::new("/dev/rfcomm0"));
/// printer.connect().await?;
///
/// let ticket = build_ticket(&demo_sale());
/// send_ticket(&mut printer, &ticket, &WriteOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RfcommConnector {
    target: RfcommTarget,
}

impl RfcommConnector {
    /// Connector for a device path or MAC address.
    pub fn new(target: &str) -> Self {
        Self {
            target: RfcommTarget::parse(target),
        }
    }

    /// Connector for the default device path (/dev/rfcomm0).
    pub fn default_device() -> Self {
        Self::new(DEFAULT_DEVICE)
    }

    pub fn target(&self) -> &RfcommTarget {
        &self.target
    }

    async fn resolve(&self) -> io::Result<PathBuf> {
        match &self.target {
            RfcommTarget::Device(path) => Ok(path.clone()),
            RfcommTarget::Mac(mac) => {
                let mac = mac.clone();
                let found = tokio::task::spawn_blocking(move || find_rfcomm_for_mac(&mac))
                    .await
                    .map_err(io::Error::other)??;
                found.map(PathBuf::from).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "no RFCOMM device bound to this address (run `rfcomm bind`)",
                    )
                })
            }
        }
    }
}

#[async_trait]
impl Connector for RfcommConnector {
    fn describe(&self) -> String {
        match &self.target {
            RfcommTarget::Device(path) => path.display().to_string(),
            RfcommTarget::Mac(mac) => mac.clone(),
        }
    }

    async fn connect(&self) -> io::Result<Box<dyn Link>> {
        let path = self.resolve().await?;

        let file = tokio::task::spawn_blocking(move || {
            let file = OpenOptions::new().write(true).open(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("Failed to open {}: {}", path.display(), e))
            })?;
            configure_tty_raw(&file)?;
            Ok::<_, io::Error>(file)
        })
        .await
        .map_err(io::Error::other)??;

        Ok(Box::new(RfcommLink {
            file: tokio::fs::File::from_std(file),
        }))
    }
}

/// An open RFCOMM TTY.
pub struct RfcommLink {
    file: tokio::fs::File,
}

#[async_trait]
impl Link for RfcommLink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.file.flush().await
    }

    async fn close(&mut self) -> io::Result<()> {
        self.file.flush().await
    }
}

/// Configure a TTY for raw binary transfer.
///
/// IXON/IXOFF/IXANY are cleared too: 0x11 (XON) and 0x13 (XOFF) must reach
/// the printer as data, not as flow control.
#[cfg(unix)]
fn configure_tty_raw(file: &fs::File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    // SAFETY: fd is an open descriptor owned by `file`
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        let err = io::Error::last_os_error();
        // Plain files (and some test doubles) are not TTYs; write to them as-is
        if err.raw_os_error() == Some(libc::ENOTTY) {
            return Ok(());
        }
        return Err(io::Error::new(err.kind(), format!("tcgetattr failed: {}", err)));
    }
    // SAFETY: tcgetattr succeeded and filled the struct
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // SAFETY: fd is valid and termios is initialized
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        let err = io::Error::last_os_error();
        return Err(io::Error::new(err.kind(), format!("tcsetattr failed: {}", err)));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// RFCOMM LOOKUP HELPERS
// ============================================================================

/// Validate a Bluetooth MAC address format (XX:XX:XX:XX:XX:XX).
pub fn is_valid_mac(mac: &str) -> bool {
    let parts: Vec<&str> = mac.split(':').collect();
    if parts.len() != 6 {
        return false;
    }
    parts
        .iter()
        .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Extract the `/dev/rfcommN` path bound to `mac` from an rfcomm listing.
///
/// Lines look like `rfcomm0: 66:22:XX:XX:XX:XX channel 1 clean`.
fn device_for_mac(listing: &str, mac: &str) -> Option<String> {
    let mac_upper = mac.to_uppercase();
    listing
        .lines()
        .filter(|line| line.to_uppercase().contains(&mac_upper))
        .filter_map(|line| line.split(':').next())
        .map(|dev_name| format!("/dev/{}", dev_name.trim()))
        .next()
}

/// Find an existing RFCOMM device bound to the given MAC address.
///
/// Checks `/proc/net/rfcomm` and falls back to the `rfcomm -a` command.
#[cfg(unix)]
pub fn find_rfcomm_for_mac(mac: &str) -> io::Result<Option<String>> {
    if let Ok(contents) = fs::read_to_string("/proc/net/rfcomm")
        && let Some(path) = device_for_mac(&contents, mac)
        && Path::new(&path).exists()
    {
        return Ok(Some(path));
    }

    let output = Command::new("rfcomm")
        .arg("-a")
        .output()
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to run 'rfcomm -a': {}", e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(device_for_mac(&stdout, mac).filter(|path| Path::new(path).exists()))
}

#[cfg(not(unix))]
pub fn find_rfcomm_for_mac(_mac: &str) -> io::Result<Option<String>> {
    Ok(None)
}

// ============================================================================
// TESTS
// ============================================================================
