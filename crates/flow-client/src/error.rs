//! Client error type.

use flow_net::TransportError;
use flow_store::error::StoreError;
use thiserror::Error;

/// Anything a client operation can fail with: a refused transport permit or
/// a store-level failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Whether retrying the same call could succeed. True only for injected
    /// transport faults; store errors are deterministic.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_transient(),
            Self::Store(_) => false,
        }
    }
}
