//! Randomized latency and write-fault injection.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use flow_config::SimConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{OpKind, Transport, TransportError};

/// Transport that behaves like a flaky remote API.
///
/// Every permit pays a uniform random latency inside the configured window.
/// Write permits are additionally refused with `failure_rate` probability.
/// Outcomes are drawn under a short-lived lock so the RNG is never held
/// across an await.
pub struct SimulatedTransport {
    latency_min: Duration,
    latency_max: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedTransport {
    #[must_use]
    pub fn new(cfg: &SimConfig) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    /// Seeded variant with a reproducible latency and fault sequence.
    #[must_use]
    pub fn with_seed(cfg: &SimConfig, seed: u64) -> Self {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: &SimConfig, rng: StdRng) -> Self {
        let latency_min = Duration::from_millis(cfg.latency_min_ms);
        Self {
            latency_min,
            // An inverted window collapses to the lower bound.
            latency_max: Duration::from_millis(cfg.latency_max_ms.max(cfg.latency_min_ms)),
            failure_rate: cfg.failure_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    fn draw(&self, op: OpKind) -> (Duration, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let span = self.latency_max - self.latency_min;
        let latency = self.latency_min + span.mul_f64(rng.gen_range(0.0..1.0));
        let faulted = op == OpKind::Write && rng.gen_bool(self.failure_rate);
        (latency, faulted)
    }
}

impl Transport for SimulatedTransport {
    async fn permit(&self, op: OpKind) -> Result<(), TransportError> {
        let (latency, faulted) = self.draw(op);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if faulted {
            tracing::debug!(%op, "injected transport fault");
            return Err(TransportError::Fault { op });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(min: u64, max: u64, rate: f64) -> SimConfig {
        SimConfig {
            latency_min_ms: min,
            latency_max_ms: max,
            failure_rate: rate,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_failure_rate_refuses_every_write() {
        let transport = SimulatedTransport::with_seed(&cfg(0, 0, 1.0), 7);
        for _ in 0..20 {
            let err = transport.permit(OpKind::Write).await.unwrap_err();
            assert!(err.is_transient());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reads_are_never_refused() {
        let transport = SimulatedTransport::with_seed(&cfg(0, 0, 1.0), 7);
        for _ in 0..20 {
            transport.permit(OpKind::Read).await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_failure_rate_always_permits() {
        let transport = SimulatedTransport::with_seed(&cfg(0, 0, 0.0), 7);
        for _ in 0..20 {
            transport.permit(OpKind::Write).await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn latency_stays_inside_the_window() {
        let transport = SimulatedTransport::with_seed(&cfg(200, 1200, 0.0), 42);
        for _ in 0..10 {
            let before = tokio::time::Instant::now();
            transport.permit(OpKind::Read).await.unwrap();
            let elapsed = before.elapsed();
            assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
            assert!(elapsed <= Duration::from_millis(1200), "elapsed {elapsed:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn inverted_window_collapses_to_lower_bound() {
        let transport = SimulatedTransport::with_seed(&cfg(500, 100, 0.0), 1);
        let before = tokio::time::Instant::now();
        transport.permit(OpKind::Read).await.unwrap();
        assert_eq!(before.elapsed(), Duration::from_millis(500));
    }
}
