//! Refresh-cycle aggregator
//!
//! One cycle fans out a fetch per registered source, waits for all of
//! them, publishes each snapshot to the board, then recomputes and
//! publishes the cross-platform totals. The cycle as a whole never fails:
//! a source error becomes that source's unavailable snapshot and nothing
//! else.

use crate::board::DisplayBoard;
use crate::format::format_metric;
use crate::sources::SourceClient;
use crate::types::{AggregateTotals, MetricSnapshot};
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

// Metric keys that roll up into each cross-platform total. Engagement
// counts (posts, likes) stay per-platform.
const FOLLOWER_KEYS: &[&str] = &["followers", "subs"];
const VIEW_KEYS: &[&str] = &["views"];
const VIDEO_KEYS: &[&str] = &["videos"];

pub struct Aggregator {
    sources: Vec<Arc<dyn SourceClient>>,
    board: Arc<DisplayBoard>,
    // Single-flight guard; the guarded value is the cycle counter
    cycle: Mutex<u64>,
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn SourceClient>>, board: Arc<DisplayBoard>) -> Self {
        Self {
            sources,
            board,
            cycle: Mutex::new(0),
        }
    }

    pub fn board(&self) -> &DisplayBoard {
        &self.board
    }

    /// Run one full refresh cycle.
    ///
    /// Returns the published snapshots, or `None` when a previous cycle is
    /// still in flight (the request is skipped, not queued).
    pub async fn refresh_once(&self) -> Option<Vec<MetricSnapshot>> {
        let mut cycle = match self.cycle.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("[Aggregator] previous cycle still running, skipping");
                return None;
            }
        };
        *cycle += 1;
        let cycle_id = *cycle;

        info!(
            "[Aggregator] cycle {} started, {} sources",
            cycle_id,
            self.sources.len()
        );

        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                match source.fetch().await {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        warn!("[{}] fetch failed: {}", source.platform(), e);
                        source.unavailable_snapshot()
                    }
                }
            }
        });
        let snapshots = join_all(fetches).await;

        for snapshot in &snapshots {
            self.publish(snapshot);
        }

        let totals = compute_totals(&snapshots);
        self.publish_totals(&totals);

        info!("[Aggregator] cycle {} complete", cycle_id);
        Some(snapshots)
    }

    /// Write one source's snapshot into its slots
    fn publish(&self, snapshot: &MetricSnapshot) {
        let prefix = snapshot.platform.id();

        for (key, value) in &snapshot.metrics {
            self.board
                .set_text(&format!("{}-{}", prefix, key), value.display());
        }
        if let Some(status) = &snapshot.status {
            self.board.set_status(&format!("{}-status", prefix), status);
        }
        if let Some(url) = &snapshot.embed_url {
            self.board.set_text("latest-video", url.clone());
        }
    }

    fn publish_totals(&self, totals: &AggregateTotals) {
        self.board
            .set_text("total-followers", format_metric(Some(totals.followers)));
        self.board
            .set_text("total-views", format_metric(Some(totals.views)));
        self.board
            .set_text("total-videos", format_metric(Some(totals.videos)));
    }
}

/// Sum the designated metrics across snapshots, skipping unavailable entries
pub fn compute_totals(snapshots: &[MetricSnapshot]) -> AggregateTotals {
    let sum = |keys: &[&str]| -> u64 {
        snapshots
            .iter()
            .flat_map(|snapshot| {
                keys.iter()
                    .filter_map(|key| snapshot.get(key).and_then(|v| v.count()))
            })
            .sum()
    };

    AggregateTotals {
        followers: sum(FOLLOWER_KEYS),
        views: sum(VIEW_KEYS),
        videos: sum(VIDEO_KEYS),
    }
}
