//! RamProbe — reported memory vs nearest whole-gigabyte nameplate capacity.
//!
//! Devices are marketed in round gigabyte figures while the usable total is
//! slightly less (reserved regions, carve-outs). The probe rounds the
//! reported total to the nearest whole GiB as an "advertised capacity" proxy
//! and scores how close the actual total comes to it.
//!
//! This is not a memory-pressure signal. Current usage and low-memory state
//! are separate host booleans outside the benchmarking core.

use crate::probe::{HealthProbe, ProbeCategory, ProbeInfo};
use crate::score::{UNKNOWN_SCORE, normalize};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

static RAM_INFO: ProbeInfo = ProbeInfo {
    name: "ram_nameplate",
    description: "Total physical memory vs nearest whole-GiB advertised capacity",
    category: ProbeCategory::Ram,
};

/// Capability interface for total physical memory.
///
/// Injected into the probe so tests can supply fixed byte counts instead of
/// querying the host.
pub trait MemoryProbe: Send + Sync {
    /// Total physical memory in bytes, or -1 when it cannot be queried.
    fn total_bytes(&self) -> i64;
}

/// [`MemoryProbe`] backed by `sysconf` on Unix hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemoryProbe;

impl MemoryProbe for SystemMemoryProbe {
    #[cfg(unix)]
    fn total_bytes(&self) -> i64 {
        let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };
        if pages <= 0 || page_size <= 0 {
            return -1;
        }
        pages.saturating_mul(page_size) as i64
    }

    #[cfg(not(unix))]
    fn total_bytes(&self) -> i64 {
        -1
    }
}

/// Health probe wrapping [`calculate_ram_health_percent`].
pub struct RamProbe {
    memory: Box<dyn MemoryProbe>,
}

impl RamProbe {
    pub fn new(memory: Box<dyn MemoryProbe>) -> Self {
        Self { memory }
    }
}

impl Default for RamProbe {
    fn default() -> Self {
        Self::new(Box::new(SystemMemoryProbe))
    }
}

impl HealthProbe for RamProbe {
    fn info(&self) -> &ProbeInfo {
        &RAM_INFO
    }

    fn is_available(&self) -> bool {
        self.memory.total_bytes() > 0
    }

    fn run(&self) -> i32 {
        calculate_ram_health_percent(self.memory.as_ref())
    }
}

/// Score the host's total memory against its nameplate capacity.
pub fn calculate_ram_health_percent(memory: &dyn MemoryProbe) -> i32 {
    score_total_bytes(memory.total_bytes())
}

/// Pure scoring half: total bytes -> nameplate ratio score.
pub fn score_total_bytes(total_bytes: i64) -> i32 {
    if total_bytes <= 0 {
        return UNKNOWN_SCORE;
    }
    let actual_gb = total_bytes as f64 / GIB;
    let advertised_gb = actual_gb.round();
    if advertised_gb <= 0.0 {
        return UNKNOWN_SCORE;
    }
    normalize(actual_gb, advertised_gb)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMemory(i64);

    impl MemoryProbe for FixedMemory {
        fn total_bytes(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn seven_point_six_of_eight_gb_is_95() {
        let bytes = (7.6 * GIB) as i64;
        assert_eq!(score_total_bytes(bytes), 95);
    }

    #[test]
    fn exact_nameplate_is_100() {
        assert_eq!(score_total_bytes(8 * 1024 * 1024 * 1024), 100);
    }

    #[test]
    fn slightly_over_nameplate_saturates() {
        // 8.2 GiB rounds to 8 advertised; ratio clamps to 1.
        let bytes = (8.2 * GIB) as i64;
        assert_eq!(score_total_bytes(bytes), 100);
    }

    #[test]
    fn non_positive_total_is_unknown() {
        assert_eq!(score_total_bytes(0), UNKNOWN_SCORE);
        assert_eq!(score_total_bytes(-1), UNKNOWN_SCORE);
    }

    #[test]
    fn tiny_total_rounds_to_zero_nameplate() {
        // 100 MiB rounds to 0 advertised GiB — no meaningful ratio.
        assert_eq!(score_total_bytes(100 * 1024 * 1024), UNKNOWN_SCORE);
    }

    #[test]
    fn probe_uses_injected_capability() {
        let probe = RamProbe::new(Box::new(FixedMemory((7.6 * GIB) as i64)));
        assert!(probe.is_available());
        assert_eq!(probe.run(), 95);

        let broken = RamProbe::new(Box::new(FixedMemory(-1)));
        assert!(!broken.is_available());
        assert_eq!(broken.run(), UNKNOWN_SCORE);
    }

    #[test]
    fn system_probe_reports_positive_total() {
        let total = SystemMemoryProbe.total_bytes();
        assert!(total > 0);
    }

    #[test]
    fn probe_trait_reports_metadata() {
        let probe = RamProbe::default();
        assert_eq!(probe.name(), "ram_nameplate");
        assert_eq!(probe.info().category, ProbeCategory::Ram);
    }
}
