//! Metrics collection and reporting using metrics-rs.
//!
//! The run loop records counters through the `metrics` facade. With no
//! recorder installed they are no-ops; `--metrics` installs [`CliRecorder`]
//! and prints a summary after the run.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::{
    Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit, counter,
    describe_counter,
};
use parking_lot::RwLock;

use crate::compare::Severity;

pub const LINES_COMPARED: &str = "nesdiff_lines_compared_total";
pub const DISCREPANCIES: &str = "nesdiff_discrepancies_total";
pub const REPORTS_SUPPRESSED: &str = "nesdiff_reports_suppressed_total";
pub const MALFORMED_LINES: &str = "nesdiff_malformed_lines_total";

/// Register metric descriptions.
pub fn init() {
    describe_counter!(LINES_COMPARED, Unit::Count, "Trace line pairs compared");
    describe_counter!(
        DISCREPANCIES,
        Unit::Count,
        "Line pairs whose records disagree, by severity"
    );
    describe_counter!(
        REPORTS_SUPPRESSED,
        Unit::Count,
        "Discrepancies not printed because they repeat the previous one"
    );
    describe_counter!(
        MALFORMED_LINES,
        Unit::Count,
        "Line pairs skipped because a line failed to parse"
    );
}

pub fn record_compared() {
    counter!(LINES_COMPARED).increment(1);
}

pub fn record_discrepancy(severity: Severity) {
    let labels = [("severity", severity.level().to_string())];
    counter!(DISCREPANCIES, &labels).increment(1);
}

pub fn record_suppressed() {
    counter!(REPORTS_SUPPRESSED).increment(1);
}

pub fn record_malformed() {
    counter!(MALFORMED_LINES).increment(1);
}

// ============================================================================
// CLI Recorder for terminal output
// ============================================================================

#[derive(Default)]
struct CounterStorage {
    values: RwLock<HashMap<String, u64>>,
}

struct CliCounter {
    key: String,
    storage: Arc<CounterStorage>,
}

impl metrics::CounterFn for CliCounter {
    fn increment(&self, value: u64) {
        let mut values = self.storage.values.write();
        *values.entry(self.key.clone()).or_insert(0) += value;
    }

    fn absolute(&self, value: u64) {
        let mut values = self.storage.values.write();
        values.insert(self.key.clone(), value);
    }
}

/// In-memory recorder that keeps counters for a terminal summary.
///
/// Gauges and histograms are accepted but discarded.
#[derive(Default)]
pub struct CliRecorder {
    counters: Arc<CounterStorage>,
}

impl CliRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install this recorder as the global metrics recorder.
    ///
    /// Returns `None` if a recorder is already installed.
    #[must_use]
    pub fn install(self) -> Option<CliRecorderHandle> {
        let counters = Arc::clone(&self.counters);
        metrics::set_global_recorder(self).ok()?;
        Some(CliRecorderHandle { counters })
    }
}

fn key_to_string(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|l| format!("{}={}", l.key(), l.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for CliRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CliCounter {
            key: key_to_string(key),
            storage: Arc::clone(&self.counters),
        }))
    }

    fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

/// Handle for reading counters after installing the CLI recorder.
pub struct CliRecorderHandle {
    counters: Arc<CounterStorage>,
}

impl CliRecorderHandle {
    #[must_use]
    pub fn get_counter(&self, key: &str) -> Option<u64> {
        self.counters.values.read().get(key).copied()
    }

    /// Print all counters, sorted by key.
    pub fn print_summary(&self) {
        let counters = self.counters.values.read();
        if counters.is_empty() {
            eprintln!("No metrics collected.");
            return;
        }

        eprintln!();
        eprintln!("## Metrics Summary");
        let mut keys: Vec<_> = counters.keys().collect();
        keys.sort();
        for key in keys {
            eprintln!("  {}: {}", key, counters[key]);
        }
    }
}
