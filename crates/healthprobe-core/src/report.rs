//! Report assembly — one collection session in, one diagnostic report out.
//!
//! [`Collector::collect_all`] runs every probe, fills identity and timestamp
//! fields from the host, and returns a [`DiagnosticReport`]. Collection never
//! fails: a probe that cannot measure degrades only its own field to the
//! unknown sentinel, and a report with sentinel fields is still valid and
//! uploadable.
//!
//! [`UploadPayload`] is the flattened wire projection of a report — only the
//! scores and device identity, camelCase field names, one POST body.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::probe::HealthProbe;
use crate::probes::battery::{BatteryProbe, DEFAULT_POWER_SUPPLY_ROOT, read_battery_health_percent};
use crate::probes::cpu::{CpuBenchConfig, CpuProbe, run_cpu_benchmark};
use crate::probes::ram::{MemoryProbe, RamProbe, SystemMemoryProbe, score_total_bytes};
use crate::probes::storage::{
    StorageBenchConfig, StorageBenchResult, StorageProbe, VolumeStats, run_storage_benchmark,
    volume_stats,
};
use crate::score::UNKNOWN_SCORE;

// ---------------------------------------------------------------------------
// Device identity
// ---------------------------------------------------------------------------

/// Device identity strings, passed through to the report verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub model: String,
    pub os_version: String,
}

/// Detect device identity (best-effort). Unreadable fields become
/// `"unknown"` rather than being absent.
pub fn detect_device_identity() -> DeviceIdentity {
    DeviceIdentity {
        manufacturer: detect_manufacturer().unwrap_or_else(|| "unknown".to_string()),
        model: detect_model().unwrap_or_else(|| "unknown".to_string()),
        os_version: detect_os_version().unwrap_or_else(|| "unknown".to_string()),
    }
}

fn detect_manufacturer() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        read_nonempty("/sys/devices/virtual/dmi/id/sys_vendor")
    }
    #[cfg(target_os = "macos")]
    {
        Some("Apple".to_string())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

fn detect_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        read_nonempty("/sys/devices/virtual/dmi/id/product_name")
    }
    #[cfg(target_os = "macos")]
    {
        let output = std::process::Command::new("sysctl")
            .arg("-n")
            .arg("hw.model")
            .output()
            .ok()?;
        let s = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if s.is_empty() { None } else { Some(s) }
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

fn detect_os_version() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/os-release").ok().and_then(|s| {
            s.lines()
                .find(|l| l.starts_with("PRETTY_NAME="))
                .map(|l| l.trim_start_matches("PRETTY_NAME=").trim_matches('"').to_string())
        })
    }
    #[cfg(target_os = "macos")]
    {
        let output = std::process::Command::new("sw_vers")
            .arg("-productVersion")
            .output()
            .ok()?;
        let s = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(format!("macOS {s}"))
        }
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

#[cfg(target_os = "linux")]
fn read_nonempty(path: &str) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let v = raw.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

// ---------------------------------------------------------------------------
// Report and payload
// ---------------------------------------------------------------------------

/// Aggregate of one collection session. Immutable after construction; the
/// caller that triggered collection owns it until it hands it to the
/// uploader.
///
/// Score fields hold either a value in `[0, 100]` or the -1 unknown
/// sentinel. The display/camera fields are reserved for future probes and
/// stay at the sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub session_id: String,
    pub collected_at_epoch_ms: u64,

    pub manufacturer: String,
    pub model: String,
    pub os_version: String,

    pub battery_health: i32,
    pub cpu_performance_pct: i32,
    pub storage_speed_pct: i32,
    pub ram_health_pct: i32,
    pub display_touch_pct: i32,
    pub camera_check_pct: i32,

    /// Raw storage throughput; -1.0 when the benchmark was unknown.
    pub storage_write_mbps: f64,
    pub storage_read_mbps: f64,

    /// Total physical memory in bytes; -1 when it could not be queried.
    pub total_ram_bytes: i64,

    /// Capacity of the volume holding the app's data directory.
    pub data_volume: VolumeStats,
    /// Capacity of the volume holding the benchmark scratch directory.
    pub scratch_volume: VolumeStats,
}

/// Flattened wire projection of a [`DiagnosticReport`].
///
/// Serialized with camelCase field names; this is the exact POST body the
/// collector's `/v1/diagnostics` endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub device_model: String,
    pub battery_health: i32,
    pub storage_speed_pct: i32,
    pub cpu_performance_pct: i32,
    pub ram_health_pct: i32,
    pub display_touch_pct: i32,
    pub camera_check_pct: i32,
}

impl UploadPayload {
    /// Reduce a report to the wire payload.
    pub fn from_report(report: &DiagnosticReport) -> Self {
        Self {
            device_model: report.model.clone(),
            battery_health: report.battery_health,
            storage_speed_pct: report.storage_speed_pct,
            cpu_performance_pct: report.cpu_performance_pct,
            ram_health_pct: report.ram_health_pct,
            display_touch_pct: report.display_touch_pct,
            camera_check_pct: report.camera_check_pct,
        }
    }
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Host paths and probe budgets for one collector.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Sysfs power-supply tree scanned by the battery probe.
    pub power_supply_root: PathBuf,
    /// Directory the storage probe writes its scratch file into.
    pub scratch_dir: PathBuf,
    /// Directory whose volume is reported as the data volume.
    pub data_dir: PathBuf,
    pub cpu: CpuBenchConfig,
    pub storage: StorageBenchConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            power_supply_root: PathBuf::from(DEFAULT_POWER_SUPPLY_ROOT),
            scratch_dir: std::env::temp_dir(),
            data_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            cpu: CpuBenchConfig::default(),
            storage: StorageBenchConfig::default(),
        }
    }
}

/// Runs all probes and assembles [`DiagnosticReport`]s.
pub struct Collector {
    config: CollectorConfig,
    memory: Box<dyn MemoryProbe>,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self::with_memory_probe(config, Box::new(SystemMemoryProbe))
    }

    /// Build a collector with an injected memory capability (for tests).
    pub fn with_memory_probe(config: CollectorConfig, memory: Box<dyn MemoryProbe>) -> Self {
        Self { config, memory }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Run every probe and assemble a report for `session_id`.
    ///
    /// Never fails. Probes run independently; each failing probe degrades
    /// only its own field to the unknown sentinel.
    pub fn collect_all(&self, session_id: &str) -> DiagnosticReport {
        let identity = detect_device_identity();

        let battery_health = read_battery_health_percent(&self.config.power_supply_root);
        let cpu_performance_pct = run_cpu_benchmark(&self.config.cpu);
        let storage: StorageBenchResult =
            run_storage_benchmark(&self.config.scratch_dir, &self.config.storage);
        let total_ram_bytes = self.memory.total_bytes();
        let ram_health_pct = score_total_bytes(total_ram_bytes);

        log::info!(
            "collected session {session_id}: battery={battery_health} cpu={cpu_performance_pct} \
             storage={} ram={ram_health_pct}",
            storage.speed_pct
        );

        DiagnosticReport {
            session_id: session_id.to_string(),
            collected_at_epoch_ms: epoch_ms_now(),
            manufacturer: identity.manufacturer,
            model: identity.model,
            os_version: identity.os_version,
            battery_health,
            cpu_performance_pct,
            storage_speed_pct: storage.speed_pct,
            ram_health_pct,
            display_touch_pct: UNKNOWN_SCORE,
            camera_check_pct: UNKNOWN_SCORE,
            storage_write_mbps: storage.write_mbps,
            storage_read_mbps: storage.read_mbps,
            total_ram_bytes,
            data_volume: volume_stats(&self.config.data_dir),
            scratch_volume: volume_stats(&self.config.scratch_dir),
        }
    }
}

/// Build the default probe set for a config. Used by callers that want
/// uniform access to probe metadata and availability (e.g. the CLI scan).
pub fn default_probes(config: &CollectorConfig) -> Vec<Box<dyn HealthProbe>> {
    vec![
        Box::new(BatteryProbe::new(config.power_supply_root.clone())),
        Box::new(CpuProbe::new(config.cpu.clone())),
        Box::new(StorageProbe::new(
            config.scratch_dir.clone(),
            config.storage.clone(),
        )),
        Box::new(RamProbe::default()),
    ]
}

fn epoch_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
