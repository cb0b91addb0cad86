//! Timed results and baseline comparison.
//!
//! A [`Baseline`] is a JSON file of [`BenchResult`]s. Results are matched
//! by name; a current result with no stored counterpart is never a regression.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How much slowdown a measurement tolerates before it counts as a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchLevel {
    /// One stage on a fixed input.
    Micro,
    /// A full `Analyzer` run. Noisy, so twice the baseline still passes.
    System,
    /// Tracked against a committed baseline.
    Regression,
}

impl BenchLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::System => "system",
            Self::Regression => "regression",
        }
    }

    /// Allowed slowdown as a fraction of the baseline time.
    pub fn tolerance(&self) -> f64 {
        match self {
            Self::Micro => 0.20,
            Self::System => 1.00,
            Self::Regression => 0.10,
        }
    }
}

/// Mean time per iteration of one named measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    pub name: String,
    pub level: BenchLevel,
    pub mean_ms: f64,
    pub iterations: u64,
    /// Components analyzed per second, when the run covers a graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<f64>,
}

impl BenchResult {
    /// Run `f` `iterations` times (at least once) and record the mean.
    pub fn measure(
        name: impl Into<String>,
        level: BenchLevel,
        iterations: u64,
        components: usize,
        mut f: impl FnMut(),
    ) -> Self {
        let iterations = iterations.max(1);
        let start = Instant::now();
        for _ in 0..iterations {
            f();
        }
        Self::from_elapsed(name, level, start.elapsed(), iterations, components)
    }

    pub fn from_elapsed(
        name: impl Into<String>,
        level: BenchLevel,
        elapsed: Duration,
        iterations: u64,
        components: usize,
    ) -> Self {
        let iterations = iterations.max(1);
        let mean_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
        let throughput =
            (mean_ms > 0.0 && components > 0).then(|| components as f64 * 1000.0 / mean_ms);
        Self {
            name: name.into(),
            level,
            mean_ms,
            iterations,
            throughput,
        }
    }

    /// Current over baseline time. `None` when the baseline recorded no time.
    pub fn slowdown(&self, baseline: &BenchResult) -> Option<f64> {
        (baseline.mean_ms > 0.0).then(|| self.mean_ms / baseline.mean_ms)
    }

    /// Slower than `baseline` by more than this result's level tolerates.
    pub fn regresses_vs(&self, baseline: &BenchResult) -> bool {
        self.slowdown(baseline)
            .is_some_and(|ratio| ratio > 1.0 + self.level.tolerance())
    }
}

/// A measurement that got slower than its stored counterpart allows.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub name: String,
    pub level: BenchLevel,
    pub baseline_ms: f64,
    pub current_ms: f64,
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {:.3} ms -> {:.3} ms, {:.2}x",
            self.name,
            self.level.as_str(),
            self.baseline_ms,
            self.current_ms,
            self.current_ms / self.baseline_ms
        )
    }
}

/// Stored results to compare later runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub results: Vec<BenchResult>,
}

impl Baseline {
    pub fn new(results: Vec<BenchResult>) -> Self {
        Self { results }
    }

    pub fn get(&self, name: &str) -> Option<&BenchResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Every result in `current` that regresses against this baseline, in
    /// `current` order.
    pub fn regressions(&self, current: &[BenchResult]) -> Vec<Regression> {
        current
            .iter()
            .filter_map(|result| {
                let stored = self.get(&result.name)?;
                result.regresses_vs(stored).then(|| Regression {
                    name: result.name.clone(),
                    level: result.level,
                    baseline_ms: stored.mean_ms,
                    current_ms: result.mean_ms,
                })
            })
            .collect()
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(std::io::Error::other)
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_vec_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
