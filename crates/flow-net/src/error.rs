//! Transport error type.

use thiserror::Error;

use crate::OpKind;

/// Failure raised by a transport instead of a permit.
///
/// Transport faults fire before the underlying operation runs, so they never
/// indicate partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Injected fault from the simulated (or scripted) transport.
    #[error("simulated network failure on {op} operation")]
    Fault { op: OpKind },
}

impl TransportError {
    /// Whether retrying the same operation could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Fault { .. })
    }
}
