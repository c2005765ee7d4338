//! Board controller error type.

use flow_client::ClientError;
use thiserror::Error;

use crate::Target;

#[derive(Debug, Error)]
pub enum BoardError {
    /// A mutation was begun on a lane that already has one in flight, under
    /// the reject policy.
    #[error("a mutation is already in flight for {target}")]
    MutationInFlight { target: Target },

    #[error("unknown job id {id}")]
    UnknownJob { id: String },

    #[error("unknown candidate id {id}")]
    UnknownCandidate { id: String },

    /// A reorder must list every board job exactly once.
    #[error("reorder must list every job exactly once")]
    IncompleteOrder,

    #[error(transparent)]
    Client(#[from] ClientError),
}
