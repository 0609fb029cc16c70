//! Concrete probe implementations.
//!
//! Each probe is independent and side-effect free on the others. Host access
//! (sysfs roots, scratch directories, memory stats) is injected so every
//! probe can run against fakes in tests.

pub mod battery;
pub mod cpu;
pub mod ram;
pub mod storage;

pub use battery::{BatteryProbe, DEFAULT_POWER_SUPPLY_ROOT, read_battery_health_percent};
pub use cpu::{BASELINE_CPU_ITERATIONS, CpuBenchConfig, CpuProbe, run_cpu_benchmark, score_iterations};
pub use ram::{MemoryProbe, RamProbe, SystemMemoryProbe, calculate_ram_health_percent, score_total_bytes};
pub use storage::{
    BASELINE_READ_MBPS, BASELINE_WRITE_MBPS, StorageBenchConfig, StorageBenchResult, StorageProbe,
    VolumeStats, run_storage_benchmark, score_throughput, volume_stats,
};
