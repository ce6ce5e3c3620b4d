//! Process signals that end a running session.

use std::io;
#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
    Hangup,
}

/// Handlers are registered by `install`; a signal that arrives before
/// [`ShutdownSignals::recv`] is polled is held until then.
pub struct ShutdownSignals {
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    hangup: Signal,
}

impl ShutdownSignals {
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    pub async fn recv(&mut self) -> Shutdown {
        tokio::select! {
            Ok(()) = tokio::signal::ctrl_c() => Shutdown::Interrupt,
            Some(()) = self.terminate.recv() => Shutdown::Terminate,
            Some(()) = self.hangup.recv() => Shutdown::Hangup,
            else => std::future::pending().await,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> Shutdown {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Shutdown::Interrupt,
            Err(_) => std::future::pending().await,
        }
    }
}
