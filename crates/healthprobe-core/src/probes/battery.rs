//! BatteryProbe — battery wear estimation from sysfs charge capacity.
//!
//! Scans a power-supply directory tree (each entry is a candidate supply
//! node; multi-battery devices expose several) and compares the current
//! maximum charge capacity (`charge_full`) against the factory-rated
//! capacity (`charge_full_design`). The first entry where both attributes
//! read as strictly positive integers wins — no averaging across batteries.
//!
//! These attributes are not guaranteed to exist on all hardware or kernel
//! builds, so every read fails soft: a missing, unreadable, empty, or
//! non-numeric attribute is treated as absent rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::probe::{HealthProbe, ProbeCategory, ProbeInfo};
use crate::score::UNKNOWN_SCORE;

/// Default sysfs power-supply root on Linux.
pub const DEFAULT_POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

static BATTERY_INFO: ProbeInfo = ProbeInfo {
    name: "battery_wear",
    description: "Battery wear from sysfs charge_full vs charge_full_design",
    category: ProbeCategory::Battery,
};

/// Health probe over a sysfs-style power-supply tree.
///
/// The root is injected so tests can point it at a fake directory tree.
pub struct BatteryProbe {
    root: PathBuf,
}

impl BatteryProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for BatteryProbe {
    fn default() -> Self {
        Self::new(DEFAULT_POWER_SUPPLY_ROOT)
    }
}

impl HealthProbe for BatteryProbe {
    fn info(&self) -> &ProbeInfo {
        &BATTERY_INFO
    }

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn run(&self) -> i32 {
        read_battery_health_percent(&self.root)
    }
}

/// Read battery health as a percentage of design capacity.
///
/// Returns `round(clamp(100 * charge_full / charge_full_design, 0, 100))`
/// for the first supply entry exposing both attributes as strictly positive
/// integers, or [`UNKNOWN_SCORE`] when no entry qualifies.
pub fn read_battery_health_percent(root: &Path) -> i32 {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return UNKNOWN_SCORE,
    };

    // Sort so multi-battery devices report the same node on every run.
    let mut nodes: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    nodes.sort();

    for node in nodes {
        let full = read_first_line_long(&node.join("charge_full"));
        let design = read_first_line_long(&node.join("charge_full_design"));

        if let (Some(full), Some(design)) = (full, design) {
            if full > 0 && design > 0 {
                let pct = (full as f64 * 100.0 / design as f64).clamp(0.0, 100.0);
                log::debug!(
                    "battery node {}: full={} design={} -> {:.1}%",
                    node.display(),
                    full,
                    design,
                    pct
                );
                return pct.round() as i32;
            }
        }
    }

    UNKNOWN_SCORE
}

/// Read the first line of a sysfs attribute as an integer.
///
/// Any failure mode (missing path, unreadable file, empty first line,
/// non-numeric content) collapses to `None`.
fn read_first_line_long(path: &Path) -> Option<i64> {
    let raw = fs::read_to_string(path).ok()?;
    let line = raw.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }
    line.parse::<i64>().ok()
}
