//! # Connection Lifecycle
//!
//! ```text
//!                connect()
//! Disconnected ────────────► Connecting
//!      ▲                      │      │
//!      │   failure / timeout  │      │ link open
//!      ├──────────────────────┘      ▼
//!      │                          Connected
//!      └──────────────────────────────┘
//!        disconnect() / link lost
//! ```
//!
//! A [`ConnectionHandle`] is passed explicitly to whoever prints; there is
//! no process-wide printer. Only one link is active per handle.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::{Connector, Link};
use crate::error::{Result, TicketeraError};

/// Default time allowed for pairing and opening the channel.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection state of a [`ConnectionHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, next),
            (Disconnected, Connecting)
                | (Connecting, Connected)
                | (Connecting, Disconnected)
                | (Connected, Disconnected)
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        f.write_str(name)
    }
}

/// The active connection to one printer.
///
/// ## Example
///
/// ```
/// use ticketera::transport::{ConnectionHandle, ConnectionState, MemoryConnector};
///
/// # tokio_test_block(async {
/// let mut handle = ConnectionHandle::new(MemoryConnector::new());
/// assert_eq!(handle.state(), ConnectionState::Disconnected);
///
/// handle.connect().await?;
/// assert!(handle.is_connected());
///
/// handle.disconnect().await?;
/// # Ok::<(), ticketera::TicketeraError>(())
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub struct ConnectionHandle {
    connector: Box<dyn Connector>,
    link: Option<Box<dyn Link>>,
    state: ConnectionState,
    connect_timeout: Duration,
}

impl ConnectionHandle {
    /// Create a disconnected handle for the printer behind `connector`.
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self::from_boxed(Box::new(connector))
    }

    /// Create a disconnected handle from an already boxed connector.
    pub fn from_boxed(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            link: None,
            state: ConnectionState::Disconnected,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set how long [`connect`](Self::connect) may take.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether a link is open and writable.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.link.is_some()
    }

    /// Human-readable printer target.
    pub fn describe(&self) -> String {
        self.connector.describe()
    }

    /// Open the link.
    ///
    /// Already connected handles are left alone. On failure or timeout the
    /// handle goes back to `Disconnected` and the error is returned.
    pub async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }

        self.transition(ConnectionState::Connecting);
        let target = self.connector.describe();
        tracing::info!(printer = %target, "connecting");

        match tokio::time::timeout(self.connect_timeout, self.connector.connect()).await {
            Ok(Ok(link)) => {
                self.link = Some(link);
                self.transition(ConnectionState::Connected);
                tracing::info!(printer = %target, "connected");
                Ok(())
            }
            Ok(Err(e)) => {
                self.transition(ConnectionState::Disconnected);
                Err(TicketeraError::Transport(format!(
                    "Failed to connect to {}: {}",
                    target, e
                )))
            }
            Err(_) => {
                self.transition(ConnectionState::Disconnected);
                Err(TicketeraError::Transport(format!(
                    "Timed out after {:?} connecting to {}",
                    self.connect_timeout, target
                )))
            }
        }
    }

    /// Close the link. Disconnecting an idle handle is a no-op.
    ///
    /// The handle ends up `Disconnected` even if closing the link fails.
    pub async fn disconnect(&mut self) -> Result<()> {
        let Some(mut link) = self.link.take() else {
            self.state = ConnectionState::Disconnected;
            return Ok(());
        };

        let closed = link.close().await;
        self.transition(ConnectionState::Disconnected);
        tracing::info!(printer = %self.connector.describe(), "disconnected");
        closed.map_err(|e| TicketeraError::Transport(format!("Close failed: {}", e)))
    }

    /// Record that the transport dropped the link.
    pub fn mark_lost(&mut self) {
        if self.link.take().is_some() || self.state != ConnectionState::Disconnected {
            tracing::warn!(printer = %self.connector.describe(), "connection lost");
            self.transition(ConnectionState::Disconnected);
        }
    }

    /// The open link, if connected.
    pub(crate) fn link_mut(&mut self) -> Option<&mut (dyn Link + 'static)> {
        match self.state {
            ConnectionState::Connected => self.link.as_deref_mut(),
            _ => None,
        }
    }

    fn transition(&mut self, next: ConnectionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "connection state");
        self.state = next;
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("printer", &self.connector.describe())
            .field("state", &self.state)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        use ConnectionState::*;
        assert!(Disconnected.can_transition_to(Connecting));
        assert!(Connecting.can_transition_to(Connected));
        assert!(Connecting.can_transition_to(Disconnected));
        assert!(Connected.can_transition_to(Disconnected));
    }

    #[test]
    fn test_forbidden_transitions() {
        use ConnectionState::*;
        assert!(!Disconnected.can_transition_to(Connected));
        assert!(!Connected.can_transition_to(Connecting));
        assert!(!Connected.can_transition_to(Connected));
        assert!(!Disconnected.can_transition_to(Disconnected));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }
}
