// src/switcher/mod.rs
//! One evaluation pass over all farm workers
//!
//! For every worker the farm reports: find its configuration, work out the
//! coin it currently mines, price the profitability feed with its cost
//! profile, rank the candidates, decide, and on a switch apply the bound
//! flight sheet. Errors end the evaluation of that worker only.

/// Coin and flight-sheet lookups
pub mod resolver;

pub use resolver::FlightSheetResolver;

use crate::config::{CoinBinding, Config};
use crate::profit::{
    CoinProfit, CostProfile, Decision, MarketQuote, ProfitCalculator, calculator, decide, rank,
};
use crate::stats::{PassReport, WorkerOutcome, WorkerReport};
use crate::types::{FlightSheet, SwitchPolicy, WorkerProfile};
use crate::utils::error::SwitcherError;
use futures::stream::{self, StreamExt};
use tokio::sync::OnceCell;

/// Farm-management operations used by a pass
#[allow(async_fn_in_trait)]
pub trait FarmApi {
    /// All workers of the farm
    async fn list_workers(&self) -> Result<Vec<WorkerProfile>, SwitcherError>;

    /// All flight sheets of the farm
    async fn list_flight_sheets(&self) -> Result<Vec<FlightSheet>, SwitcherError>;

    /// Applies a flight sheet to a worker
    async fn set_flight_sheet(&self, worker_id: u64, flight_sheet_id: u64) -> Result<(), SwitcherError>;
}

/// Market data used by a pass
#[allow(async_fn_in_trait)]
pub trait MarketData {
    /// Current BTC/USD rate
    async fn btc_usd_rate(&self) -> Result<f64, SwitcherError>;

    /// Profitability feed for a worker's endpoint, in feed order
    async fn quotes(&self, endpoint: &str) -> Result<Vec<MarketQuote>, SwitcherError>;
}

/// Rules applied when choosing between candidates
#[derive(Debug, Clone, Copy)]
pub struct SelectionRules<'a> {
    /// Candidate filter
    pub policy: SwitchPolicy,
    /// Worker's coin bindings
    pub bindings: &'a [CoinBinding],
    /// Hysteresis margin in percent
    pub hysteresis_percent: f64,
}

/// Result of evaluating one worker's candidates
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Coin the worker currently mines
    pub current_coin: String,
    /// Its profit, if the feed listed it
    pub current_profit: Option<f64>,
    /// Top-ranked candidate
    pub best: CoinProfit,
    /// Stay or switch
    pub decision: Decision,
}

/// Ranks already computed profits and decides
///
/// The current coin's profit is taken from the unfiltered profits, so a
/// worker mining a coin the policy excludes can still be compared.
pub fn evaluate_profits(
    profits: Vec<CoinProfit>,
    current_coin: &str,
    rules: &SelectionRules<'_>,
) -> Result<Evaluation, SwitcherError> {
    let current_profit = calculator::profit_of(&profits, current_coin);
    let ranking = rank(profits, rules.policy, rules.bindings)?;
    let best = ranking.best().clone();

    let decision = decide(
        current_coin,
        current_profit,
        &best.coin,
        best.profit,
        rules.hysteresis_percent,
    )?;

    Ok(Evaluation {
        current_coin: current_coin.to_string(),
        current_profit,
        best,
        decision,
    })
}

/// Prices the feed for one worker, then ranks and decides
pub fn evaluate_market(
    quotes: &[MarketQuote],
    profile: &CostProfile,
    btc_usd: f64,
    current_coin: &str,
    rules: &SelectionRules<'_>,
) -> Result<Evaluation, SwitcherError> {
    let calculator = ProfitCalculator::new(profile, btc_usd)?;
    let profits = calculator.coin_profits(quotes)?;
    evaluate_profits(profits, current_coin, rules)
}

/// Keeps worker-scoped errors, turns the rest into `wrap(message)`
fn worker_scoped(err: SwitcherError, wrap: fn(String) -> SwitcherError) -> SwitcherError {
    if err.is_worker_scoped() {
        err
    } else {
        wrap(err.to_string())
    }
}

/// Per-run options of a pass
#[derive(Debug, Clone, Copy)]
pub struct PassOptions {
    /// Candidate filter
    pub policy: SwitchPolicy,
    /// Decide but never call the farm's update operation
    pub dry_run: bool,
    /// Workers evaluated at the same time (at least 1)
    pub concurrency: usize,
}

impl PassOptions {
    /// Options taken from the configuration: sequential, not a dry run
    pub fn from_config(config: &Config) -> Self {
        PassOptions {
            policy: config.change_type,
            dry_run: false,
            concurrency: 1,
        }
    }
}

/// Runs evaluation passes against a farm and a market data source
pub struct Switcher<'a, F, M> {
    config: &'a Config,
    farm: F,
    market: M,
    options: PassOptions,
    flight_sheets: OnceCell<Vec<FlightSheet>>,
}

impl<'a, F: FarmApi, M: MarketData> Switcher<'a, F, M> {
    /// Creates a switcher
    pub fn new(config: &'a Config, farm: F, market: M, options: PassOptions) -> Self {
        Switcher {
            config,
            farm,
            market,
            options,
            flight_sheets: OnceCell::new(),
        }
    }

    /// Evaluates every farm worker once
    ///
    /// Reports come back in the order the farm listed the workers, whatever
    /// the concurrency.
    ///
    /// # Errors
    /// Only if the worker list itself cannot be fetched.
    pub async fn run_pass(&self) -> Result<PassReport, SwitcherError> {
        let workers = self.farm.list_workers().await?;
        log::info!(
            "Evaluating {} workers (policy {}, margin {}%{})",
            workers.len(),
            self.options.policy,
            self.config.coin_difference,
            if self.options.dry_run { ", dry run" } else { "" }
        );

        let reports = stream::iter(workers.iter())
            .map(|worker| self.report_worker(worker))
            .buffered(self.options.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(PassReport::new(reports))
    }

    async fn report_worker(&self, worker: &WorkerProfile) -> WorkerReport {
        let outcome = match self.evaluate_worker(worker).await {
            Ok(outcome) => outcome,
            Err(e) => WorkerOutcome::failed(&e),
        };

        let report = WorkerReport {
            worker: worker.name.clone(),
            outcome,
        };
        report.log();
        report
    }

    /// Evaluates one worker and applies the decision
    pub async fn evaluate_worker(&self, worker: &WorkerProfile) -> Result<WorkerOutcome, SwitcherError> {
        let worker_config = self.config.worker(&worker.name).ok_or_else(|| {
            SwitcherError::ConfigurationMismatch(format!(
                "Worker \"{}\" not found on config file",
                worker.name
            ))
        })?;

        let current_sheet = worker.flight_sheet.as_ref().ok_or_else(|| {
            SwitcherError::ConfigurationMismatch(format!(
                "Worker \"{}\" has no flight sheet",
                worker.name
            ))
        })?;

        let resolver = FlightSheetResolver::new(&worker_config.coins);
        let current_coin = resolver.current_coin(&current_sheet.name)?;
        let profile = CostProfile::from_endpoint(&worker_config.wtm_endpoint)?;

        let btc_usd = self
            .market
            .btc_usd_rate()
            .await
            .map_err(|e| worker_scoped(e, SwitcherError::MarketDataUnavailable))?;
        let quotes = self
            .market
            .quotes(&worker_config.wtm_endpoint)
            .await
            .map_err(|e| worker_scoped(e, SwitcherError::MarketDataUnavailable))?;

        let rules = SelectionRules {
            policy: self.options.policy,
            bindings: &worker_config.coins,
            hysteresis_percent: self.config.coin_difference,
        };
        let evaluation = evaluate_market(&quotes, &profile, btc_usd, current_coin, &rules)?;

        let (coin, profit) = match evaluation.decision {
            Decision::Stay => {
                return Ok(WorkerOutcome::Stay {
                    coin: evaluation.current_coin,
                    profit: evaluation.current_profit,
                    best: evaluation.best.coin,
                });
            }
            Decision::SwitchTo { coin, profit } => (coin, profit),
        };

        let flight_sheet = resolver.flight_sheet_for(&coin)?;
        let sheets = self.flight_sheets().await?;
        let flight_sheet_id = FlightSheetResolver::flight_sheet_id(flight_sheet, sheets)?;

        if self.options.dry_run {
            return Ok(WorkerOutcome::WouldSwitch {
                coin,
                flight_sheet: flight_sheet.to_string(),
                profit,
            });
        }

        self.farm
            .set_flight_sheet(worker.id, flight_sheet_id)
            .await
            .map_err(|e| worker_scoped(e, SwitcherError::RemoteUpdateFailed))?;

        Ok(WorkerOutcome::Switched {
            coin,
            flight_sheet: flight_sheet.to_string(),
            profit,
        })
    }

    /// Farm flight sheets, fetched once per switcher
    async fn flight_sheets(&self) -> Result<&[FlightSheet], SwitcherError> {
        let sheets = self
            .flight_sheets
            .get_or_try_init(|| async {
                self.farm.list_flight_sheets().await.map_err(|e| {
                    worker_scoped(e, |msg| {
                        SwitcherError::RemoteUpdateFailed(format!(
                            "Could not list flight sheets: {}",
                            msg
                        ))
                    })
                })
            })
            .await?;
        Ok(sheets.as_slice())
    }
}
