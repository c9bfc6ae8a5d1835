//! Run-set documents for integration tests.

use serde_json::{Map, Value, json};

/// Builder for one side's run-set document.
#[derive(Debug, Clone)]
pub struct RunSetBuilder {
    context: Map<String, Value>,
    benchmarks: Vec<Value>,
    total_duration: Option<f64>,
}

impl RunSetBuilder {
    pub fn new(mode: &str) -> Self {
        let mut context = Map::new();
        context.insert("benchmark_mode".to_string(), json!(mode));
        Self {
            context,
            benchmarks: Vec::new(),
            total_duration: None,
        }
    }

    pub fn ordered() -> Self {
        Self::new("Ordered")
    }

    pub fn shuffled() -> Self {
        Self::new("Shuffled")
    }

    pub fn context(mut self, key: &str, value: Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn total_duration(mut self, nanos: f64) -> Self {
        self.total_duration = Some(nanos);
        self
    }

    /// A benchmark whose successful runs all take `duration_ns`.
    pub fn benchmark(self, name: &str, runs: usize, duration_ns: f64, items_per_second: f64) -> Self {
        self.benchmark_with_runs(name, &vec![duration_ns; runs], items_per_second)
    }

    pub fn benchmark_with_runs(mut self, name: &str, durations: &[f64], items_per_second: f64) -> Self {
        self.benchmarks.push(json!({
            "name": name,
            "duration": durations.iter().sum::<f64>(),
            "items_per_second": items_per_second,
            "successful_runs": runs(durations),
            "unsuccessful_runs": [],
        }));
        self
    }

    /// Attach unsuccessful runs to the most recently added benchmark.
    pub fn failures(mut self, durations: &[f64], benchmark_duration_ns: f64) -> Self {
        let last = self
            .benchmarks
            .last_mut()
            .expect("failures() needs a benchmark");
        last["unsuccessful_runs"] = runs(durations);
        last["duration"] = json!(benchmark_duration_ns);
        self
    }

    pub fn build(self) -> Value {
        let mut summary = Map::new();
        if let Some(total) = self.total_duration {
            summary.insert("total_duration".to_string(), json!(total));
        }
        json!({
            "context": self.context,
            "benchmarks": self.benchmarks,
            "summary": summary,
        })
    }
}

fn runs(durations: &[f64]) -> Value {
    Value::Array(
        durations
            .iter()
            .map(|duration| json!({ "duration": duration }))
            .collect(),
    )
}

/// Durations around `center_ns` with a small deterministic spread.
pub fn spread_runs(count: usize, center_ns: f64, spread_ns: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let offset = (i % 5) as f64 - 2.0;
            center_ns + offset * spread_ns
        })
        .collect()
}
