//! # flow-sync
//!
//! Optimistic board mutations over the client.
//!
//! [`BoardController`] holds an in-memory view of the hiring board (the
//! ordered job list plus the candidate pipeline) and applies drag-and-drop
//! mutations optimistically: the view changes immediately, the write is
//! dispatched through the transport in the background, and the eventual
//! settle either commits the canonical records or rolls the view back to an
//! exact pre-mutation snapshot.
//!
//! Each mutation targets one lane ([`Target`]) and carries a monotonic
//! sequence number. A settle whose sequence is no longer the lane's current
//! one is discarded, so a superseded mutation can never clobber a newer one.

mod controller;
mod error;
mod types;

pub use controller::BoardController;
pub use error::BoardError;
pub use types::{OnConflict, SettleEvent, SettleOutcome, Target};
