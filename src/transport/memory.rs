//! # In-Memory Transport
//!
//! A [`Connector`] whose links record every chunk instead of sending it.
//! Backs `ticketera print --dry-run` and the transport tests.
//!
//! The connector can be scripted to refuse connections, to take a while to
//! connect, to fail a specific write, or to fail on close.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{Connector, Link};

type Writes = Arc<Mutex<Vec<Vec<u8>>>>;

/// Connector producing [`MemoryLink`]s that share one write log.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    writes: Writes,
    refuse: Option<io::ErrorKind>,
    connect_delay: Option<Duration>,
    fail_write: Option<(usize, io::ErrorKind)>,
    fail_close: Option<io::ErrorKind>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every connection attempt fail with `kind`.
    pub fn refuse_with(mut self, kind: io::ErrorKind) -> Self {
        self.refuse = Some(kind);
        self
    }

    /// Delay connection by `delay`.
    pub fn connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    /// Fail the write with zero-based index `index` (counted per link).
    pub fn fail_write(mut self, index: usize, kind: io::ErrorKind) -> Self {
        self.fail_write = Some((index, kind));
        self
    }

    /// Make closing a link fail with `kind`.
    pub fn fail_close(mut self, kind: io::ErrorKind) -> Self {
        self.fail_close = Some(kind);
        self
    }

    /// Every chunk written so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// All written bytes concatenated.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.writes().concat()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn connect(&self) -> io::Result<Box<dyn Link>> {
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(kind) = self.refuse {
            return Err(io::Error::new(kind, "connection refused by memory connector"));
        }
        Ok(Box::new(MemoryLink {
            writes: Arc::clone(&self.writes),
            fail_write: self.fail_write,
            fail_close: self.fail_close,
            attempts: 0,
        }))
    }
}

/// Link that appends each chunk to a shared log.
#[derive(Debug)]
pub struct MemoryLink {
    writes: Writes,
    fail_write: Option<(usize, io::ErrorKind)>,
    fail_close: Option<io::ErrorKind>,
    attempts: usize,
}

#[async_trait]
impl Link for MemoryLink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let index = self.attempts;
        self.attempts += 1;

        if let Some((fail_at, kind)) = self.fail_write
            && fail_at == index
        {
            return Err(io::Error::new(kind, format!("write {} rejected", index)));
        }

        self.writes
            .lock()
            .map_err(|_| io::Error::other("write log poisoned"))?
            .push(chunk.to_vec());
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        match self.fail_close {
            Some(kind) => Err(io::Error::new(kind, "close rejected")),
            None => Ok(()),
        }
    }
}
