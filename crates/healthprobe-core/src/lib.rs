//! # healthprobe-core
//!
//! On-device hardware health micro-benchmarks, scored and uploaded.
//!
//! healthprobe collects a device's hardware health indicators by running
//! short single-pass probes — battery wear from sysfs charge capacity, CPU
//! iteration throughput, sequential storage I/O, RAM nameplate ratio — and
//! normalizes each raw measurement into a comparable 0–100 score. A score of
//! -1 means "could not be measured" and is distinct from a legitimate 0.
//!
//! ## Quick Start
//!
//! ```no_run
//! use healthprobe_core::{Collector, CollectorConfig, UploadPayload};
//!
//! let collector = Collector::new(CollectorConfig::default());
//! let report = collector.collect_all("0b5c1e6e-session");
//! println!("cpu: {}", report.cpu_performance_pct);
//!
//! let payload = UploadPayload::from_report(&report);
//! ```
//!
//! ## Architecture
//!
//! Probes → Normalizer → Report → Upload
//!
//! Every probe implements the [`HealthProbe`] trait and fails soft: a
//! measurement that cannot be taken degrades its own report field to the
//! unknown sentinel and nothing else. Collection always completes; upload
//! either fully succeeds or fully fails for that one attempt.
//!
//! Host access (sysfs trees, scratch directories, memory stats) is injected
//! through paths and small capability traits so the whole core runs against
//! fakes in tests.

pub mod probe;
pub mod probes;
pub mod report;
pub mod score;
pub mod upload;

pub use probe::{HealthProbe, ProbeCategory, ProbeInfo};
pub use probes::battery::{BatteryProbe, DEFAULT_POWER_SUPPLY_ROOT, read_battery_health_percent};
pub use probes::cpu::{
    BASELINE_CPU_ITERATIONS, CpuBenchConfig, CpuProbe, DEFAULT_CPU_BUDGET, run_cpu_benchmark,
    score_iterations,
};
pub use probes::ram::{
    MemoryProbe, RamProbe, SystemMemoryProbe, calculate_ram_health_percent, score_total_bytes,
};
pub use probes::storage::{
    BASELINE_READ_MBPS, BASELINE_WRITE_MBPS, STORAGE_CHUNK_BYTES, STORAGE_PROBE_BYTES,
    StorageBenchConfig, StorageBenchResult, StorageProbe, VolumeStats, run_storage_benchmark,
    score_throughput, volume_stats,
};
pub use report::{
    Collector, CollectorConfig, DeviceIdentity, DiagnosticReport, UploadPayload, default_probes,
    detect_device_identity,
};
pub use score::{UNKNOWN_SCORE, is_known, normalize};
pub use upload::{UPLOAD_PATH, UploadError, Uploader};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
