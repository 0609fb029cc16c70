//! CpuProbe — achievable iteration throughput inside a fixed wall-clock budget.
//!
//! Runs a tight, non-yielding loop applying `x = sin(x) + cos(x)` for one
//! second and counts completed iterations. The budget is hard: the loop exits
//! as soon as elapsed time reaches it, regardless of device speed. Iterations
//! are normalized against a fixed baseline representing a healthy device, so
//! faster hardware saturates at 100 rather than exceeding it.
//!
//! This is a best-effort single-pass probe — no warm-up control, no outlier
//! rejection, no multi-run averaging.

use std::time::{Duration, Instant};

use crate::probe::{HealthProbe, ProbeCategory, ProbeInfo};
use crate::score::{UNKNOWN_SCORE, normalize};

/// Iterations a healthy reference device completes within the default budget.
pub const BASELINE_CPU_ITERATIONS: u64 = 5_000_000;

/// Default wall-clock budget for the busy loop.
pub const DEFAULT_CPU_BUDGET: Duration = Duration::from_secs(1);

/// Iterations between elapsed-time checks. Checking every iteration would
/// make the clock read dominate the measurement on fast hardware.
const ELAPSED_CHECK_INTERVAL: u64 = 256;

static CPU_INFO: ProbeInfo = ProbeInfo {
    name: "cpu_throughput",
    description: "Iteration throughput of a sin+cos busy loop over a fixed wall-clock budget",
    category: ProbeCategory::Cpu,
};

/// Configuration for the CPU benchmark.
#[derive(Debug, Clone)]
pub struct CpuBenchConfig {
    /// Hard wall-clock budget for the busy loop.
    pub budget: Duration,
    /// Reference iteration count for normalization.
    pub baseline_iterations: u64,
}

impl Default for CpuBenchConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_CPU_BUDGET,
            baseline_iterations: BASELINE_CPU_ITERATIONS,
        }
    }
}

/// Health probe wrapping [`run_cpu_benchmark`].
#[derive(Debug, Clone, Default)]
pub struct CpuProbe {
    config: CpuBenchConfig,
}

impl CpuProbe {
    pub fn new(config: CpuBenchConfig) -> Self {
        Self { config }
    }
}

impl HealthProbe for CpuProbe {
    fn info(&self) -> &ProbeInfo {
        &CPU_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn run(&self) -> i32 {
        run_cpu_benchmark(&self.config)
    }
}

/// Run the busy loop and normalize the iteration count to a 0–100 score.
pub fn run_cpu_benchmark(config: &CpuBenchConfig) -> i32 {
    let start = Instant::now();
    let mut x: f64 = 1.0;
    let mut iterations: u64 = 0;

    loop {
        for _ in 0..ELAPSED_CHECK_INTERVAL {
            x = x.sin() + x.cos();
            iterations += 1;
        }
        if start.elapsed() >= config.budget {
            break;
        }
    }

    // Keep the loop result observable so the transformation is not
    // optimized away.
    std::hint::black_box(x);

    log::debug!(
        "cpu benchmark: {} iterations in {:?}",
        iterations,
        start.elapsed()
    );
    score_iterations(iterations, config.baseline_iterations)
}

/// Normalize a completed iteration count against the baseline.
///
/// Zero iterations means the loop never ran — report unknown rather than a
/// score of 0.
pub fn score_iterations(iterations: u64, baseline: u64) -> i32 {
    if iterations == 0 {
        return UNKNOWN_SCORE;
    }
    normalize(iterations as f64, baseline as f64)
}
