//! Shared "ranking pipeline" logic.
//!
//! fetch short -> pause -> fetch medium -> pause -> fetch long -> aggregate -> rank
//!
//! Calls are strictly sequential. The pause exists only between two network
//! calls. A failure on any horizon ends the run without a partial ranking.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::data::{EndpointTable, FetchError, HorizonFetcher, Transport};
use crate::domain::{Horizon, HorizonReturnMap, OperatorDirectory, RankOrder, RankedResultSet};
use crate::report::{HorizonCoverage, aggregate, coverage, rank_with_order};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    Fetching(Horizon),
    PacingAfter(Horizon),
    Aggregating,
    Ranking,
    Done,
    /// Absorbing: the run stopped while fetching this horizon.
    Failed(Horizon),
}

/// A horizon fetch failed and the run was aborted.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("fetching {horizon:?} horizon failed: {source}")]
pub struct PipelineError {
    pub horizon: Horizon,
    pub source: FetchError,
}

/// Blocking wait between consecutive calls.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// All computed outputs of one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ranking: RankedResultSet,
    pub coverage: Vec<HorizonCoverage>,
}

pub struct Pipeline<'a, T: Transport, P: Pacer> {
    transport: &'a T,
    endpoints: &'a EndpointTable,
    directory: &'a OperatorDirectory,
    pacer: P,
    delay: Duration,
    rank_key: Horizon,
    order: RankOrder,
    stage: Stage,
    history: Vec<Stage>,
}

impl<'a, T: Transport, P: Pacer> Pipeline<'a, T, P> {
    /// Ranks by the long horizon, descending, unless told otherwise.
    pub fn new(
        transport: &'a T,
        endpoints: &'a EndpointTable,
        directory: &'a OperatorDirectory,
        pacer: P,
        delay: Duration,
    ) -> Self {
        Self {
            transport,
            endpoints,
            directory,
            pacer,
            delay,
            rank_key: Horizon::Long,
            order: RankOrder::Descending,
            stage: Stage::NotStarted,
            history: vec![Stage::NotStarted],
        }
    }

    pub fn rank_by(mut self, key: Horizon, order: RankOrder) -> Self {
        self.rank_key = key;
        self.order = order;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage the last run went through, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Execute one full run. Each call starts again from `NotStarted`.
    pub fn run(&mut self) -> Result<RunOutput, PipelineError> {
        self.stage = Stage::NotStarted;
        self.history = vec![Stage::NotStarted];
        let fetcher = HorizonFetcher::new(self.transport, self.endpoints);

        let short = self.fetch_step(&fetcher, Horizon::Short)?;
        self.pace_after(Horizon::Short);
        let medium = self.fetch_step(&fetcher, Horizon::Medium)?;
        self.pace_after(Horizon::Medium);
        let long = self.fetch_step(&fetcher, Horizon::Long)?;

        self.transition(Stage::Aggregating);
        let horizon_coverage = vec![
            coverage(self.directory, Horizon::Short, &short),
            coverage(self.directory, Horizon::Medium, &medium),
            coverage(self.directory, Horizon::Long, &long),
        ];
        let records = aggregate(self.directory, &short, &medium, &long);

        self.transition(Stage::Ranking);
        let ranking = rank_with_order(records, self.rank_key, self.order);

        self.transition(Stage::Done);
        Ok(RunOutput {
            ranking,
            coverage: horizon_coverage,
        })
    }

    fn fetch_step(
        &mut self,
        fetcher: &HorizonFetcher<'a, T>,
        horizon: Horizon,
    ) -> Result<HorizonReturnMap, PipelineError> {
        self.transition(Stage::Fetching(horizon));
        fetcher.fetch(horizon).map_err(|source| {
            warn!(horizon = horizon.label(), error = %source, "aborting run");
            self.transition(Stage::Failed(horizon));
            PipelineError { horizon, source }
        })
    }

    fn pace_after(&mut self, horizon: Horizon) {
        self.transition(Stage::PacingAfter(horizon));
        info!(delay_secs = self.delay.as_secs_f64(), "pausing between API calls");
        self.pacer.pause(self.delay);
    }

    fn transition(&mut self, next: Stage) {
        info!(from = ?self.stage, to = ?next, "pipeline stage");
        self.stage = next;
        self.history.push(next);
    }
}
