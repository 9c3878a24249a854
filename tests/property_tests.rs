//! Property-based tests for urlpulse using proptest
//!
//! These tests generate random inputs to check the concurrency ceiling,
//! the status filter and the handling of malformed lines.

use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use urlpulse::report::filter;
use urlpulse::{Dispatcher, LineReporter, Probe, ProbeOutcome, ProbeResult, ProbeTarget, Report};

/// Counts how many probes run at the same time.
#[derive(Default)]
struct CountingProber {
    status_code: u16,
    latency_ms: u64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Probe for CountingProber {
    async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        ProbeOutcome::Analyzed(ProbeResult {
            url: target.to_string(),
            status_code: self.status_code,
            adjusted_size: 0,
            word_count: 1,
            content_type: String::new(),
        })
    }
}

/// Shares counters with the test after the dispatcher is done.
#[derive(Clone, Default)]
struct CountingReporter {
    emitted: Arc<AtomicUsize>,
}

impl Report for CountingReporter {
    fn emit(&self, _result: &ProbeResult) {
        self.emitted.fetch_add(1, Ordering::SeqCst);
    }
}

/// Prober that is shared with the test through an Arc.
struct SharedProber(Arc<CountingProber>);

#[async_trait]
impl Probe for SharedProber {
    async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        self.0.probe(target).await
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

/// Lines that can never parse into a probe target
fn malformed_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        r"[ \t]{1,5}",
        r"[a-z]{1,15}",                  // No scheme
        r"[a-z]{3,8}\.com/[a-z]{0,8}",   // Host without scheme
        Just("http://".to_string()),     // Incomplete
        r"ftp://[a-z]{3,8}\.com",        // Unsupported scheme
        r"mailto:[a-z]{3,8}@example\.com",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_concurrency_never_exceeds_ceiling(
        concurrency in 1usize..8,
        url_count in 0usize..40,
        latency_ms in 0u64..5,
    ) {
        let prober = Arc::new(CountingProber {
            status_code: 200,
            latency_ms,
            ..Default::default()
        });
        let reporter = CountingReporter::default();
        let input: String = (0..url_count)
            .map(|i| format!("http://host{i}.example/\n"))
            .collect();

        let dispatcher = Dispatcher::new(
            SharedProber(Arc::clone(&prober)),
            reporter.clone(),
            concurrency,
            Duration::ZERO,
        );
        let summary = runtime().block_on(dispatcher.run(input.as_bytes()));

        prop_assert!(prober.max_in_flight.load(Ordering::SeqCst) <= concurrency);
        prop_assert_eq!(prober.in_flight.load(Ordering::SeqCst), 0);
        prop_assert_eq!(summary.dispatched, url_count);
        prop_assert_eq!(prober.calls.load(Ordering::SeqCst), url_count);
        prop_assert_eq!(reporter.emitted.load(Ordering::SeqCst), url_count);
    }

    #[test]
    fn test_filter_passes_low_and_server_error_codes(status in prop_oneof![100u16..=300, 500u16..=999]) {
        prop_assert!(filter::passes(status));
    }

    #[test]
    fn test_filter_drops_redirects_and_client_errors(status in 301u16..=499) {
        prop_assert!(!filter::passes(status));
    }

    #[test]
    fn test_filtered_statuses_are_never_reported(status in 100u16..=599, url_count in 1usize..10) {
        let prober = Arc::new(CountingProber {
            status_code: status,
            ..Default::default()
        });
        let input: String = (0..url_count)
            .map(|i| format!("https://site{i}.example/path\n"))
            .collect();
        let dispatcher = Dispatcher::new(
            SharedProber(Arc::clone(&prober)),
            LineReporter::new(Vec::new()),
            4,
            Duration::ZERO,
        );

        let summary = runtime().block_on(dispatcher.run(input.as_bytes()));

        if filter::passes(status) {
            prop_assert_eq!(summary.reported, url_count);
            prop_assert_eq!(summary.filtered, 0);
        } else {
            prop_assert_eq!(summary.reported, 0);
            prop_assert_eq!(summary.filtered, url_count);
        }
    }

    #[test]
    fn test_malformed_lines_are_never_probed(
        lines in prop::collection::vec(malformed_line_strategy(), 0..30)
    ) {
        let prober = Arc::new(CountingProber::default());
        let reporter = CountingReporter::default();
        let input = lines.join("\n");
        let dispatcher = Dispatcher::new(
            SharedProber(Arc::clone(&prober)),
            reporter.clone(),
            2,
            Duration::ZERO,
        );

        let summary = runtime().block_on(dispatcher.run(input.as_bytes()));

        prop_assert_eq!(summary.dispatched, 0);
        prop_assert_eq!(summary.skipped, summary.lines_read);
        prop_assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
        prop_assert_eq!(reporter.emitted.load(Ordering::SeqCst), 0);
    }
}
