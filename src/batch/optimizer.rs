use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{BatchError, BatchResult};
use crate::config::Config;
use crate::coverage::{AssignedChunk, CoverageWorkItem, WorkItemStatus};

/// Outcome of optimizing one work item.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    /// Passage score of the query after the content change.
    pub new_score: f64,
    /// Chunk that now serves the query, if it changed.
    pub chunk: Option<AssignedChunk>,
}

#[async_trait]
/// Produces improved content for one query and reports its new score.
pub trait Optimizer: Send + Sync {
    async fn optimize(&self, item: &CoverageWorkItem) -> BatchResult<Optimization>;
}

/// Cooperative cancellation, checked between units.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub item_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Items selected for this batch.
    pub attempted: usize,
    pub optimized: usize,
    pub failed: Vec<BatchFailure>,
    /// Items never started because the batch was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Optimizes work items strictly one at a time.
pub struct BatchOptimizer {
    optimizer: Arc<dyn Optimizer>,
    delay: Duration,
    running: AtomicBool,
    cancel: CancelFlag,
}

impl BatchOptimizer {
    pub fn new(optimizer: Arc<dyn Optimizer>, delay: Duration) -> Self {
        Self {
            optimizer,
            delay,
            running: AtomicBool::new(false),
            cancel: CancelFlag::new(),
        }
    }

    /// Uses the configured inter-unit delay.
    pub fn from_config(optimizer: Arc<dyn Optimizer>, config: &Config) -> Self {
        Self::new(optimizer, config.batch_delay)
    }

    /// Handle that cancels the batch currently running.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Optimizes every ready or gap item in `items`, in order.
    ///
    /// A failed unit is returned to its previous status and recorded in the report;
    /// the batch moves on. Cancellation stops the batch before the next unit starts.
    pub async fn run(&self, items: &mut [CoverageWorkItem]) -> BatchResult<BatchReport> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(BatchError::AlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);
        self.cancel.clear();

        let targets: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                matches!(item.status, WorkItemStatus::Ready | WorkItemStatus::Gap)
            })
            .map(|(i, _)| i)
            .collect();

        let mut report = BatchReport {
            attempted: targets.len(),
            ..BatchReport::default()
        };
        info!(units = targets.len(), "Batch optimization started");

        for (position, &index) in targets.iter().enumerate() {
            if position > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                report.skipped = targets.len() - position;
                info!(skipped = report.skipped, "Batch optimization cancelled");
                break;
            }

            let item = &mut items[index];
            item.begin_optimization()?;
            debug!(item_id = %item.id, query = %item.query.text, "Optimizing work item");

            match self.optimizer.optimize(item).await {
                Ok(outcome) => {
                    item.complete_optimization(outcome.new_score, outcome.chunk)?;
                    report.optimized += 1;
                }
                Err(e) => {
                    item.abandon_optimization()?;
                    warn!(item_id = %item.id, error = %e, "Work item optimization failed");
                    report.failed.push(BatchFailure {
                        item_id: item.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            optimized = report.optimized,
            failed = report.failed.len(),
            "Batch optimization finished"
        );
        Ok(report)
    }
}
