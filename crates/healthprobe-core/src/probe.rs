//! Abstract health probe trait and metadata.
//!
//! Every micro-benchmark implements the [`HealthProbe`] trait, which provides
//! metadata via [`ProbeInfo`], availability checking, and a single blocking
//! measurement run. Probes are synchronous and CPU/IO-bound; callers must not
//! run them on a latency-sensitive thread.

/// Report category a probe's score lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeCategory {
    /// Battery wear (charge_full vs charge_full_design).
    Battery,
    /// CPU iteration throughput.
    Cpu,
    /// Sequential storage write+read throughput.
    Storage,
    /// RAM nameplate capacity ratio.
    Ram,
    /// Display/touch check. Reserved, no probe yet.
    Display,
    /// Camera check. Reserved, no probe yet.
    Camera,
}

impl std::fmt::Display for ProbeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Battery => write!(f, "battery"),
            Self::Cpu => write!(f, "cpu"),
            Self::Storage => write!(f, "storage"),
            Self::Ram => write!(f, "ram"),
            Self::Display => write!(f, "display"),
            Self::Camera => write!(f, "camera"),
        }
    }
}

/// Metadata about a health probe.
#[derive(Debug, Clone)]
pub struct ProbeInfo {
    /// Unique identifier (e.g. `"cpu_throughput"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Report category this probe fills.
    pub category: ProbeCategory,
}

/// Trait that every health probe must implement.
///
/// `run` is best-effort: it never panics and never returns an error. A probe
/// that cannot measure reports [`crate::UNKNOWN_SCORE`] instead.
pub trait HealthProbe: Send + Sync {
    /// Probe metadata.
    fn info(&self) -> &ProbeInfo;

    /// Check if this probe can operate on the current machine.
    fn is_available(&self) -> bool;

    /// Run the measurement and return a score in `[0, 100]`, or
    /// [`crate::UNKNOWN_SCORE`] when the measurement could not be taken.
    fn run(&self) -> i32;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}
