//! Recurring refresh scheduler
//!
//! Owns the repeating cycle with an explicit lifecycle: the first cycle
//! runs immediately after `start`, then every period until `stop`.

use crate::aggregator::Aggregator;
use crate::error::{BoardError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Running,
    Stopped,
}

pub struct Scheduler {
    aggregator: Arc<Aggregator>,
    period: Duration,
    state: Arc<RwLock<Lifecycle>>,
}

impl Scheduler {
    pub fn new(aggregator: Arc<Aggregator>, period: Duration) -> Self {
        Self {
            aggregator,
            period,
            state: Arc::new(RwLock::new(Lifecycle::Created)),
        }
    }

    pub async fn state(&self) -> Lifecycle {
        *self.state.read().await
    }

    /// Start the recurring cycle (returns immediately, runs in background)
    pub async fn start(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if *state == Lifecycle::Running {
                return Err(BoardError::Scheduler("already running".to_string()));
            }
            *state = Lifecycle::Running;
        }

        info!("[Scheduler] starting, period={}s", self.period.as_secs());

        let aggregator = Arc::clone(&self.aggregator);
        let state = Arc::clone(&self.state);
        let period = self.period;

        tokio::spawn(async move {
            // The first tick fires immediately
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;

                if *state.read().await != Lifecycle::Running {
                    break;
                }

                aggregator.refresh_once().await;
            }
        });

        Ok(())
    }

    /// Stop the schedule; the background task exits at its next tick
    pub async fn stop(&self) {
        let mut state = self.state.write().await;
        *state = Lifecycle::Stopped;
        info!("[Scheduler] stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DisplayBoard;
    use crate::error::Result as BoardResult;
    use crate::sources::SourceClient;
    use crate::types::{MetricSnapshot, MetricValue, Platform};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSource {
        calls: Arc<AtomicU64>,
    }

    #[async_trait]
    impl SourceClient for CountingSource {
        fn platform(&self) -> Platform {
            Platform::Twitter
        }

        fn metric_keys(&self) -> &'static [&'static str] {
            &["followers"]
        }

        async fn fetch(&self) -> BoardResult<MetricSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut snapshot = MetricSnapshot::new(Platform::Twitter);
            snapshot.set("followers", MetricValue::Count(1));
            Ok(snapshot)
        }
    }

    fn scheduler_with_counter(period: Duration) -> (Scheduler, Arc<AtomicU64>) {
        let calls = Arc::new(AtomicU64::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
        };
        let aggregator = Arc::new(Aggregator::new(
            vec![Arc::new(source)],
            Arc::new(DisplayBoard::with_default_slots()),
        ));
        (Scheduler::new(aggregator, period), calls)
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let (scheduler, _calls) = scheduler_with_counter(Duration::from_secs(300));
        assert_eq!(scheduler.state().await, Lifecycle::Created);

        scheduler.start().await.unwrap();
        assert_eq!(scheduler.state().await, Lifecycle::Running);

        scheduler.stop().await;
        assert_eq!(scheduler.state().await, Lifecycle::Stopped);
    }

    #[tokio::test]
    async fn test_start_twice_is_an_error() {
        let (scheduler, _calls) = scheduler_with_counter(Duration::from_secs(300));
        scheduler.start().await.unwrap();
        assert!(scheduler.start().await.is_err());
    }

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let (scheduler, calls) = scheduler_with_counter(Duration::from_secs(300));
        scheduler.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_recurring_cycles_until_stopped() {
        let (scheduler, calls) = scheduler_with_counter(Duration::from_millis(30));
        scheduler.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(160)).await;
        scheduler.stop().await;
        let seen = calls.load(Ordering::SeqCst);
        assert!(seen >= 2, "expected at least 2 cycles, saw {}", seen);

        // No further cycles after stop settles
        tokio::time::sleep(Duration::from_millis(80)).await;
        let settled = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(calls.load(Ordering::SeqCst), settled);
    }
}
