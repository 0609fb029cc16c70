pub mod collect;
pub mod probe;
pub mod scan;
pub mod upload;

use std::time::Duration;

use healthprobe_core::{CollectorConfig, CpuBenchConfig};

use crate::ProbeArgs;

/// Build a collector config from the shared probe flags.
pub fn collector_config(args: &ProbeArgs) -> CollectorConfig {
    let mut config = CollectorConfig::default();
    if let Some(dir) = &args.scratch_dir {
        config.scratch_dir = dir.clone();
    }
    if let Some(root) = &args.power_supply_root {
        config.power_supply_root = root.clone();
    }
    if let Some(ms) = args.cpu_budget_ms {
        config.cpu = CpuBenchConfig {
            budget: Duration::from_millis(ms),
            ..config.cpu
        };
    }
    config
}
