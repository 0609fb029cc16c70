//! Integration tests for healthprobe-core.
//!
//! These tests run the full collection pipeline against a fake device:
//! fake sysfs power-supply tree → probes → report assembly → wire payload.

use std::fs;
use std::path::Path;
use std::time::Duration;

use healthprobe_core::{
    Collector, CollectorConfig, CpuBenchConfig, MemoryProbe, StorageBenchConfig, UNKNOWN_SCORE,
    UploadPayload, default_probes,
};

const GIB: i64 = 1024 * 1024 * 1024;

struct FixedMemory(i64);

impl MemoryProbe for FixedMemory {
    fn total_bytes(&self) -> i64 {
        self.0
    }
}

fn fake_power_supply(root: &Path, full: i64, design: i64) {
    let node = root.join("battery");
    fs::create_dir_all(&node).unwrap();
    fs::write(node.join("charge_full"), format!("{full}\n")).unwrap();
    fs::write(node.join("charge_full_design"), format!("{design}\n")).unwrap();
}

/// Fast budgets so the suite does not spend seconds per collection.
fn fast_config(power_supply_root: &Path, scratch_dir: &Path) -> CollectorConfig {
    CollectorConfig {
        power_supply_root: power_supply_root.to_path_buf(),
        scratch_dir: scratch_dir.to_path_buf(),
        data_dir: scratch_dir.to_path_buf(),
        cpu: CpuBenchConfig {
            budget: Duration::from_millis(20),
            ..CpuBenchConfig::default()
        },
        storage: StorageBenchConfig {
            total_bytes: 256 * 1024,
            chunk_bytes: 64 * 1024,
            ..StorageBenchConfig::default()
        },
    }
}

#[test]
fn collect_all_fills_every_field() {
    let sysfs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    fake_power_supply(sysfs.path(), 3000, 4000);

    let collector = Collector::with_memory_probe(
        fast_config(sysfs.path(), scratch.path()),
        Box::new(FixedMemory(8 * GIB)),
    );
    let report = collector.collect_all("session-1");

    assert_eq!(report.session_id, "session-1");
    assert!(report.collected_at_epoch_ms > 0);
    assert!(!report.model.is_empty());

    assert_eq!(report.battery_health, 75);
    assert!((0..=100).contains(&report.cpu_performance_pct));
    assert!((0..=100).contains(&report.storage_speed_pct));
    assert_eq!(report.ram_health_pct, 100);

    // Reserved categories stay at the sentinel.
    assert_eq!(report.display_touch_pct, UNKNOWN_SCORE);
    assert_eq!(report.camera_check_pct, UNKNOWN_SCORE);

    assert!(report.storage_write_mbps > 0.0);
    assert!(report.storage_read_mbps > 0.0);
    assert_eq!(report.total_ram_bytes, 8 * GIB);
    assert!(report.scratch_volume.total_bytes > 0);
}

#[test]
fn failing_probes_degrade_only_their_own_fields() {
    let sysfs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    // No power-supply nodes, no memory stats, broken scratch dir.
    let mut config = fast_config(sysfs.path(), scratch.path());
    config.scratch_dir = scratch.path().join("missing");

    let collector = Collector::with_memory_probe(config, Box::new(FixedMemory(-1)));
    let report = collector.collect_all("session-2");

    assert_eq!(report.battery_health, UNKNOWN_SCORE);
    assert_eq!(report.storage_speed_pct, UNKNOWN_SCORE);
    assert_eq!(report.ram_health_pct, UNKNOWN_SCORE);
    assert_eq!(report.total_ram_bytes, -1);

    // The CPU probe has no host dependencies and still produced a score.
    assert!((0..=100).contains(&report.cpu_performance_pct));
}

#[test]
fn repeated_collection_is_stable_for_deterministic_fields() {
    let sysfs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    fake_power_supply(sysfs.path(), 3600, 4000);

    let collector = Collector::with_memory_probe(
        fast_config(sysfs.path(), scratch.path()),
        Box::new(FixedMemory(8 * GIB)),
    );

    let first = collector.collect_all("session-3a");
    let second = collector.collect_all("session-3b");

    // Battery and RAM are pure functions of unchanged inputs. CPU and
    // storage vary with machine load, so only their formulas are checked
    // in unit tests.
    assert_eq!(first.battery_health, second.battery_health);
    assert_eq!(first.ram_health_pct, second.ram_health_pct);
    assert_eq!(first.battery_health, 90);
}

#[test]
fn payload_projection_matches_report() {
    let sysfs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    fake_power_supply(sysfs.path(), 4000, 4000);

    let collector = Collector::with_memory_probe(
        fast_config(sysfs.path(), scratch.path()),
        Box::new(FixedMemory(8 * GIB)),
    );
    let report = collector.collect_all("session-4");
    let payload = UploadPayload::from_report(&report);

    assert_eq!(payload.device_model, report.model);
    assert_eq!(payload.battery_health, 100);
    assert_eq!(payload.ram_health_pct, 100);
    assert_eq!(payload.storage_speed_pct, report.storage_speed_pct);
    assert_eq!(payload.cpu_performance_pct, report.cpu_performance_pct);
}

#[test]
fn probe_set_metadata_and_availability() {
    let sysfs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    fake_power_supply(sysfs.path(), 4000, 4000);

    let probes = default_probes(&fast_config(sysfs.path(), scratch.path()));
    assert_eq!(probes.len(), 4);
    for probe in &probes {
        assert!(!probe.name().is_empty());
        assert!(!probe.info().description.is_empty());
    }

    // Battery and storage point at real directories here, so both report
    // available.
    let battery = probes.iter().find(|p| p.name() == "battery_wear").unwrap();
    assert!(battery.is_available());
    let storage = probes
        .iter()
        .find(|p| p.name() == "storage_throughput")
        .unwrap();
    assert!(storage.is_available());
}
