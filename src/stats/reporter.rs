// src/stats/reporter.rs
use crate::utils::error::SwitcherError;
use serde::Serialize;

/// What happened to one worker during a pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkerOutcome {
    /// Current coin kept
    Stay {
        /// Current coin identifier
        coin: String,
        /// Its daily profit, if the feed listed it
        profit: Option<f64>,
        /// Top-ranked candidate; differs from `coin` when the margin held the worker
        best: String,
    },
    /// Flight sheet changed on the farm
    Switched {
        /// New coin identifier
        coin: String,
        /// Flight sheet applied
        flight_sheet: String,
        /// Estimated daily profit in USD
        profit: f64,
    },
    /// A switch was decided but not applied (dry run)
    WouldSwitch {
        /// New coin identifier
        coin: String,
        /// Flight sheet that would be applied
        flight_sheet: String,
        /// Estimated daily profit in USD
        profit: f64,
    },
    /// Evaluation aborted for this worker
    Failed {
        /// Error kind
        kind: &'static str,
        /// Error message
        message: String,
    },
}

impl WorkerOutcome {
    /// Builds the outcome for an evaluation error
    pub fn failed(error: &SwitcherError) -> Self {
        WorkerOutcome::Failed {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Outcome of one worker, by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerReport {
    /// Worker name
    pub worker: String,
    /// What happened
    #[serde(flatten)]
    pub outcome: WorkerOutcome,
}

impl WorkerReport {
    /// Logs the outcome as a single line
    pub fn log(&self) {
        match &self.outcome {
            WorkerOutcome::Stay { coin, profit, best } if best == coin => match profit {
                Some(profit) => log::info!(
                    "Worker \"{}\" already on best coin {} (${:.2}/24h)",
                    self.worker,
                    coin,
                    profit
                ),
                None => log::info!("Worker \"{}\" already on best coin {}", self.worker, coin),
            },
            WorkerOutcome::Stay { coin, profit, best } => log::info!(
                "Worker \"{}\" kept on {} (${:.2}/24h): {} is not ahead by the switch margin",
                self.worker,
                coin,
                profit.unwrap_or_default(),
                best
            ),
            WorkerOutcome::Switched {
                flight_sheet,
                profit,
                ..
            } => log::info!(
                "Worker \"{}\" flight sheet updated to \"{}\". Estimated profit in 24h: ${:.2}",
                self.worker,
                flight_sheet,
                profit
            ),
            WorkerOutcome::WouldSwitch {
                flight_sheet,
                profit,
                ..
            } => log::info!(
                "Worker \"{}\" would switch to \"{}\" (dry run). Estimated profit in 24h: ${:.2}",
                self.worker,
                flight_sheet,
                profit
            ),
            WorkerOutcome::Failed { message, .. } => {
                log::warn!("Worker \"{}\" skipped: {}", self.worker, message)
            }
        }
    }
}

/// Counts per outcome for a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Workers looked at
    pub evaluated: usize,
    /// Workers left on their coin
    pub stayed: usize,
    /// Workers switched (or that would be, in a dry run)
    pub switched: usize,
    /// Workers whose evaluation failed
    pub failed: usize,
}

/// Report of one pass over all farm workers, in farm order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassReport {
    /// Per-worker outcomes
    pub workers: Vec<WorkerReport>,
}

impl PassReport {
    /// Wraps the per-worker reports
    pub fn new(workers: Vec<WorkerReport>) -> Self {
        PassReport { workers }
    }

    /// Counts outcomes
    pub fn summary(&self) -> PassSummary {
        let mut summary = PassSummary {
            evaluated: self.workers.len(),
            ..PassSummary::default()
        };

        for report in &self.workers {
            match report.outcome {
                WorkerOutcome::Stay { .. } => summary.stayed += 1,
                WorkerOutcome::Switched { .. } | WorkerOutcome::WouldSwitch { .. } => {
                    summary.switched += 1
                }
                WorkerOutcome::Failed { .. } => summary.failed += 1,
            }
        }

        summary
    }

    /// Logs the pass summary
    pub fn log_summary(&self) {
        let summary = self.summary();
        log::info!(
            "Pass complete: {} workers, {} stayed, {} switched, {} failed",
            summary.evaluated,
            summary.stayed,
            summary.switched,
            summary.failed
        );
    }
}
