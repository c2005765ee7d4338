//! # flow-net
//!
//! Latency and fault injection in front of the store.
//!
//! Every store round-trip first acquires a permit from a [`Transport`]. The
//! simulated transport sleeps for a random interval and, for writes, may
//! refuse the permit with a transient fault. The fault fires before the
//! store is touched, so a refused write leaves no partial state behind.

mod error;
mod scripted;
mod simulated;

pub use error::TransportError;
pub use scripted::{ScriptedTransport, Step};
pub use simulated::SimulatedTransport;

use std::fmt;
use std::future::Future;

/// Whether an operation reads or mutates the collections. Only writes are
/// subject to fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Read,
    Write,
}

impl OpKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gatekeeper for store round-trips.
///
/// `permit` resolves after the transport's latency has elapsed. `Ok` means
/// the operation may run; `Err` means it must not, and nothing has been
/// persisted.
pub trait Transport: Send + Sync {
    fn permit(&self, op: OpKind) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Pass-through transport: no latency, no faults. Useful for tests that
/// exercise store semantics rather than network behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransport;

impl Transport for DirectTransport {
    async fn permit(&self, _op: OpKind) -> Result<(), TransportError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn direct_transport_always_permits() {
        let transport = DirectTransport;
        transport.permit(OpKind::Read).await.unwrap();
        transport.permit(OpKind::Write).await.unwrap();
    }

    #[test]
    fn op_kind_display() {
        assert_eq!(OpKind::Read.to_string(), "read");
        assert_eq!(OpKind::Write.to_string(), "write");
    }
}
