use crate::analyzer;
use crate::error::AnalysisSkip;
use crate::fetcher::Fetcher;
use crate::notifier::Notifier;
use std::time::Duration;
use tracing::{error, info, warn};

/// What one pass through the loop did. Returned so tests can drive cycles
/// without real time or a live notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Notified,
    NoData,
    Skipped(AnalysisSkip),
    NotifyFailed,
}

/// Fixed-interval poll loop: fetch, analyze, notify, sleep. Every expected
/// failure is logged and the loop carries on; one bad cycle never stops the
/// next.
pub struct Monitor {
    fetcher: Fetcher,
    notifier: Box<dyn Notifier>,
    symbol: String,
    expiry: String,
    interval: Duration,
}

impl Monitor {
    pub fn new(
        fetcher: Fetcher,
        notifier: Box<dyn Notifier>,
        symbol: impl Into<String>,
        expiry: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            symbol: symbol.into(),
            expiry: expiry.into(),
            interval,
        }
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        info!(symbol = %self.symbol, expiry = %self.expiry, "checking option chain");

        let snapshot = match self.fetcher.fetch_snapshot(&self.symbol, &self.expiry).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "no data this cycle");
                return CycleOutcome::NoData;
            }
        };

        let result = match analyzer::analyze(&snapshot) {
            Ok(result) => result,
            Err(skip) => {
                warn!(reason = %skip, "analysis skipped");
                return CycleOutcome::Skipped(skip);
            }
        };

        let message = analyzer::render_message(&result);
        info!(
            underlying = result.underlying_value,
            atm_strike = result.atm_strike,
            atm_sum = result.atm_sum,
            "analysis complete"
        );

        match self.notifier.notify(&message).await {
            Ok(()) => CycleOutcome::Notified,
            Err(err) => {
                // A missed notification must not stop monitoring
                error!(error = %err, "notification failed");
                CycleOutcome::NotifyFailed
            }
        }
    }

    pub async fn run(&self) {
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
