use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::config::Config;
use crate::core::types::{DropReason, ProbeOutcome, ProbeTarget};
use crate::probe::Probe;
use crate::report::{Report, filter};

/// Counters of a finished run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub lines_read: usize,
    /// Blank or malformed lines that were never dispatched
    pub skipped: usize,
    pub dispatched: usize,
    pub reported: usize,
    /// Responses suppressed by the status filter
    pub filtered: usize,
    /// Probes that ended without a response
    pub dropped: usize,
    /// Error that stopped reading the input early
    pub read_error: Option<std::io::Error>,
}

#[derive(Debug, Default)]
struct TaskCounters {
    reported: AtomicUsize,
    filtered: AtomicUsize,
    dropped: AtomicUsize,
}

/// Reads candidate lines and probes them with at most `concurrency`
/// probes in flight.
///
/// A slot is taken before a probe task is spawned and is released only
/// when that task finishes, so the ceiling holds for the whole lifetime
/// of every probe, optional delay included.
pub struct Dispatcher<P, R> {
    prober: Arc<P>,
    reporter: Arc<R>,
    concurrency: usize,
    delay: Duration,
}

impl<P: Probe, R: Report> Dispatcher<P, R> {
    pub fn new(prober: P, reporter: R, concurrency: usize, delay: Duration) -> Self {
        Self {
            prober: Arc::new(prober),
            reporter: Arc::new(reporter),
            concurrency: concurrency.max(1),
            delay,
        }
    }

    pub fn from_config(prober: P, reporter: R, config: &Config) -> Self {
        Self::new(
            prober,
            reporter,
            config.concurrency(),
            config.delay_duration(),
        )
    }

    /// Probe every line of `source`, then wait for all probes to finish.
    pub async fn run<S>(&self, source: S) -> RunSummary
    where
        S: AsyncBufRead + Unpin,
    {
        let slots = Arc::new(Semaphore::new(self.concurrency));
        let counters = Arc::new(TaskCounters::default());
        let mut in_flight = JoinSet::new();
        let mut summary = RunSummary::default();
        let mut lines = source.split(b'\n');

        loop {
            let raw = match lines.next_segment().await {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    summary.read_error = Some(err);
                    break;
                }
            };
            summary.lines_read += 1;

            let Ok(line) = String::from_utf8(raw) else {
                debug!("skipping line {}: not valid UTF-8", summary.lines_read);
                summary.skipped += 1;
                continue;
            };

            let target = match ProbeTarget::parse(&line) {
                Ok(target) => target,
                Err(reason) => {
                    debug!("skipping {line:?}: {reason}");
                    summary.skipped += 1;
                    continue;
                }
            };

            let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
                // The semaphore is never closed while the loop runs
                break;
            };

            let prober = Arc::clone(&self.prober);
            let reporter = Arc::clone(&self.reporter);
            let task_counters = Arc::clone(&counters);
            let delay = self.delay;
            in_flight.spawn(async move {
                let _permit = permit;
                let outcome = prober.probe(&target).await;
                let responded = outcome.is_analyzed();
                settle(outcome, reporter.as_ref(), &task_counters);
                if responded && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            });
            summary.dispatched += 1;

            // Reap finished tasks so a long input does not pile up handles
            while let Some(joined) = in_flight.try_join_next() {
                record_join(joined, &counters);
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            record_join(joined, &counters);
        }

        summary.reported = counters.reported.load(Ordering::Relaxed);
        summary.filtered = counters.filtered.load(Ordering::Relaxed);
        summary.dropped = counters.dropped.load(Ordering::Relaxed);
        summary
    }
}

/// Filter and report one outcome.
fn settle<R: Report>(outcome: ProbeOutcome, reporter: &R, counters: &TaskCounters) {
    match outcome {
        ProbeOutcome::Analyzed(result) if filter::passes(result.status_code) => {
            reporter.emit(&result);
            counters.reported.fetch_add(1, Ordering::Relaxed);
        }
        ProbeOutcome::Analyzed(result) => {
            debug!("filtered {} ({})", result.url, result.status_code);
            counters.filtered.fetch_add(1, Ordering::Relaxed);
        }
        ProbeOutcome::Dropped(reason) => {
            debug!("dropped probe: {reason}");
            counters.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn record_join(joined: Result<(), JoinError>, counters: &TaskCounters) {
    if let Err(err) = joined {
        let reason = DropReason::Panicked(err.to_string());
        error!("{reason}");
        counters.dropped.fetch_add(1, Ordering::Relaxed);
    }
}
