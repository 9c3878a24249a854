use log::debug;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::core::types::ProbeResult;

/// Sink for results that passed the filter. Called concurrently from
/// every probe task; reporting never fails the probe.
pub trait Report: Send + Sync + 'static {
    fn emit(&self, result: &ProbeResult);
}

/// Writes one line per result.
///
/// Each line is written under a lock so concurrent tasks never interleave
/// within a line.
#[derive(Debug)]
pub struct LineReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Take back the writer, e.g. to inspect what was written
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LineReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> Report for LineReporter<W> {
    fn emit(&self, result: &ProbeResult) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = writeln!(out, "{result}").and_then(|_| out.flush()) {
            debug!("could not write result for {}: {err}", result.url);
        }
    }
}
