//! Deterministic transport for tests that need exact permit outcomes.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::{OpKind, Transport, TransportError};

/// One scripted permit outcome: how long it takes and whether it is refused.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub delay: Duration,
    pub fault: bool,
}

impl Step {
    /// A permit that succeeds after `delay`.
    #[must_use]
    pub const fn ok(delay: Duration) -> Self {
        Self {
            delay,
            fault: false,
        }
    }

    /// A permit that is refused after `delay`.
    #[must_use]
    pub const fn fault(delay: Duration) -> Self {
        Self { delay, fault: true }
    }
}

/// Transport that replays fixed scripts for permits.
///
/// Reads and writes consume from separate queues, in order. An exhausted
/// queue means the permit resolves immediately and succeeds, so scripts only
/// need to cover the operations under test.
pub struct ScriptedTransport {
    reads: Mutex<VecDeque<Step>>,
    writes: Mutex<VecDeque<Step>>,
}

impl ScriptedTransport {
    /// Script write permits only; reads resolve immediately.
    #[must_use]
    pub fn new(writes: impl IntoIterator<Item = Step>) -> Self {
        Self::with_reads([], writes)
    }

    /// Script both read and write permits.
    #[must_use]
    pub fn with_reads(
        reads: impl IntoIterator<Item = Step>,
        writes: impl IntoIterator<Item = Step>,
    ) -> Self {
        Self {
            reads: Mutex::new(reads.into_iter().collect()),
            writes: Mutex::new(writes.into_iter().collect()),
        }
    }

    fn next_step(&self, op: OpKind) -> Option<Step> {
        let queue = match op {
            OpKind::Read => &self.reads,
            OpKind::Write => &self.writes,
        };
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl Transport for ScriptedTransport {
    async fn permit(&self, op: OpKind) -> Result<(), TransportError> {
        let Some(step) = self.next_step(op) else {
            return Ok(());
        };
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        if step.fault {
            return Err(TransportError::Fault { op });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn write_steps_are_consumed_in_order() {
        let transport = ScriptedTransport::new([
            Step::ok(Duration::ZERO),
            Step::fault(Duration::ZERO),
        ]);
        transport.permit(OpKind::Write).await.unwrap();
        transport.permit(OpKind::Write).await.unwrap_err();
        // Script exhausted: writes succeed immediately.
        transport.permit(OpKind::Write).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn reads_do_not_consume_write_steps() {
        let transport = ScriptedTransport::new([Step::fault(Duration::ZERO)]);
        transport.permit(OpKind::Read).await.unwrap();
        transport.permit(OpKind::Read).await.unwrap();
        transport.permit(OpKind::Write).await.unwrap_err();
    }

    #[tokio::test(start_paused = true)]
    async fn read_script_delays_reads() {
        let transport =
            ScriptedTransport::with_reads([Step::ok(Duration::from_millis(300))], []);
        let before = tokio::time::Instant::now();
        transport.permit(OpKind::Read).await.unwrap();
        assert_eq!(before.elapsed(), Duration::from_millis(300));

        // Second read falls off the script and is instant.
        let before = tokio::time::Instant::now();
        transport.permit(OpKind::Read).await.unwrap();
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn delays_elapse_before_the_outcome() {
        let transport = ScriptedTransport::new([Step::fault(Duration::from_millis(300))]);
        let before = tokio::time::Instant::now();
        transport.permit(OpKind::Write).await.unwrap_err();
        assert_eq!(before.elapsed(), Duration::from_millis(300));
    }
}
