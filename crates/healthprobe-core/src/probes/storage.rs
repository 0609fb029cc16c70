//! StorageProbe — sequential write+read throughput against a scratch file.
//!
//! Writes 32 MiB of random data in 1 MiB chunks to a scratch file, forces it
//! to durable storage with an explicit sync, then reopens the file and reads
//! it back sequentially, timing each phase with a monotonic clock. The two
//! throughputs are normalized against asymmetric baselines (sequential reads
//! are typically faster than writes on flash) and averaged into one score.
//!
//! Either phase failing — an I/O error, a short read, a non-positive elapsed
//! time — makes the whole benchmark unknown; there is no partial score from
//! a single phase. The scratch file is deleted on every exit path.
//!
//! The module also exposes raw volume capacity stats ([`volume_stats`]),
//! independently fallible and with "unreadable" (-1) distinct from
//! "volume absent" (0).

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::probe::{HealthProbe, ProbeCategory, ProbeInfo};
use crate::score::UNKNOWN_SCORE;

/// Total bytes written and read back by the probe.
pub const STORAGE_PROBE_BYTES: usize = 32 * 1024 * 1024;

/// Size of each sequential write chunk.
pub const STORAGE_CHUNK_BYTES: usize = 1024 * 1024;

/// Reference sequential write throughput of a healthy device.
pub const BASELINE_WRITE_MBPS: f64 = 200.0;

/// Reference sequential read throughput of a healthy device.
pub const BASELINE_READ_MBPS: f64 = 400.0;

/// Scratch file name created inside the configured scratch directory.
const SCRATCH_FILE_NAME: &str = "healthprobe_io_probe.bin";

static STORAGE_INFO: ProbeInfo = ProbeInfo {
    name: "storage_throughput",
    description: "Sequential write+read throughput of a synced scratch file",
    category: ProbeCategory::Storage,
};

/// Configuration for the storage benchmark.
#[derive(Debug, Clone)]
pub struct StorageBenchConfig {
    /// Total bytes to write and read back.
    pub total_bytes: usize,
    /// Bytes per sequential write chunk.
    pub chunk_bytes: usize,
    /// Write throughput baseline in MB/s.
    pub baseline_write_mbps: f64,
    /// Read throughput baseline in MB/s.
    pub baseline_read_mbps: f64,
}

impl Default for StorageBenchConfig {
    fn default() -> Self {
        Self {
            total_bytes: STORAGE_PROBE_BYTES,
            chunk_bytes: STORAGE_CHUNK_BYTES,
            baseline_write_mbps: BASELINE_WRITE_MBPS,
            baseline_read_mbps: BASELINE_READ_MBPS,
        }
    }
}

/// Outcome of one storage benchmark run.
///
/// `write_mbps`/`read_mbps` are -1.0 when the benchmark is unknown; both
/// phases succeed or neither is reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StorageBenchResult {
    pub speed_pct: i32,
    pub write_mbps: f64,
    pub read_mbps: f64,
}

impl StorageBenchResult {
    pub const fn unknown() -> Self {
        Self {
            speed_pct: UNKNOWN_SCORE,
            write_mbps: -1.0,
            read_mbps: -1.0,
        }
    }
}

/// Health probe wrapping [`run_storage_benchmark`].
pub struct StorageProbe {
    scratch_dir: PathBuf,
    config: StorageBenchConfig,
}

impl StorageProbe {
    pub fn new(scratch_dir: impl Into<PathBuf>, config: StorageBenchConfig) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            config,
        }
    }
}

impl HealthProbe for StorageProbe {
    fn info(&self) -> &ProbeInfo {
        &STORAGE_INFO
    }

    fn is_available(&self) -> bool {
        self.scratch_dir.is_dir()
    }

    fn run(&self) -> i32 {
        run_storage_benchmark(&self.scratch_dir, &self.config).speed_pct
    }
}

/// Deletes the scratch file when dropped, covering every exit path.
struct ScratchGuard {
    path: PathBuf,
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Run the write+read throughput benchmark against `scratch_dir`.
pub fn run_storage_benchmark(scratch_dir: &Path, config: &StorageBenchConfig) -> StorageBenchResult {
    let path = scratch_dir.join(SCRATCH_FILE_NAME);
    let _guard = ScratchGuard { path: path.clone() };

    match run_phases(&path, config) {
        Some(result) => {
            log::debug!(
                "storage benchmark: write {:.1} MB/s, read {:.1} MB/s -> {}",
                result.write_mbps,
                result.read_mbps,
                result.speed_pct
            );
            result
        }
        None => {
            log::warn!("storage benchmark failed, reporting unknown");
            StorageBenchResult::unknown()
        }
    }
}

/// Both timed phases. Any failure yields `None` for the whole benchmark.
fn run_phases(path: &Path, config: &StorageBenchConfig) -> Option<StorageBenchResult> {
    let chunks = (config.total_bytes / config.chunk_bytes).max(1);
    let mut buf = vec![0u8; config.chunk_bytes];
    rand::rng().fill_bytes(&mut buf);

    // Write phase: sequential chunks, then force to durable storage so the
    // measurement covers the device, not the page cache.
    let write_start = Instant::now();
    {
        let mut file = File::create(path).ok()?;
        for _ in 0..chunks {
            file.write_all(&buf).ok()?;
        }
        file.sync_all().ok()?;
    }
    let write_secs = write_start.elapsed().as_secs_f64();

    // Read phase: reopen and read sequentially to EOF.
    let mut total_read = 0usize;
    let read_start = Instant::now();
    {
        let mut file = File::open(path).ok()?;
        loop {
            let n = file.read(&mut buf).ok()?;
            if n == 0 {
                break;
            }
            total_read += n;
        }
    }
    let read_secs = read_start.elapsed().as_secs_f64();

    let total_bytes = chunks * config.chunk_bytes;
    if write_secs <= 0.0 || read_secs <= 0.0 || total_read < total_bytes {
        return None;
    }

    let total_mb = total_bytes as f64 / (1024.0 * 1024.0);
    let write_mbps = total_mb / write_secs;
    let read_mbps = total_mb / read_secs;

    Some(StorageBenchResult {
        speed_pct: score_throughput(write_mbps, read_mbps, config),
        write_mbps,
        read_mbps,
    })
}

/// Combine write and read throughput into one 0–100 score.
///
/// Each throughput is clamped against its own baseline before the two
/// ratios are averaged, so an absurdly fast read cannot mask a slow write.
pub fn score_throughput(write_mbps: f64, read_mbps: f64, config: &StorageBenchConfig) -> i32 {
    if !write_mbps.is_finite()
        || !read_mbps.is_finite()
        || write_mbps <= 0.0
        || read_mbps <= 0.0
        || config.baseline_write_mbps <= 0.0
        || config.baseline_read_mbps <= 0.0
    {
        return UNKNOWN_SCORE;
    }
    let w = (write_mbps / config.baseline_write_mbps).clamp(0.0, 1.0);
    let r = (read_mbps / config.baseline_read_mbps).clamp(0.0, 1.0);
    ((w + r) / 2.0 * 100.0).round() as i32
}

// ---------------------------------------------------------------------------
// Volume capacity stats
// ---------------------------------------------------------------------------

/// Raw capacity of a storage volume in bytes.
///
/// `0` means the volume is absent; `-1` means it exists but could not be
/// queried. The two are deliberately distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub total_bytes: i64,
    pub free_bytes: i64,
}

impl VolumeStats {
    pub const fn unreadable() -> Self {
        Self {
            total_bytes: -1,
            free_bytes: -1,
        }
    }

    pub const fn absent() -> Self {
        Self {
            total_bytes: 0,
            free_bytes: 0,
        }
    }
}

/// Query total/free capacity of the volume holding `path`.
pub fn volume_stats(path: &Path) -> VolumeStats {
    if !path.exists() {
        return VolumeStats::absent();
    }

    #[cfg(unix)]
    {
        statvfs_stats(path).unwrap_or_else(VolumeStats::unreadable)
    }
    #[cfg(not(unix))]
    {
        VolumeStats::unreadable()
    }
}

#[cfg(unix)]
fn statvfs_stats(path: &Path) -> Option<VolumeStats> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    let mut vfs: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut vfs) };
    if rc != 0 {
        return None;
    }

    // f_frsize is the fundamental block size; some filesystems report 0
    // and only fill f_bsize.
    let block = if vfs.f_frsize > 0 {
        vfs.f_frsize as u64
    } else {
        vfs.f_bsize as u64
    };

    Some(VolumeStats {
        total_bytes: (vfs.f_blocks as u64).saturating_mul(block) as i64,
        free_bytes: (vfs.f_bavail as u64).saturating_mul(block) as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small config so tests stay fast: 256 KiB in 64 KiB chunks.
    fn small_config() -> StorageBenchConfig {
        StorageBenchConfig {
            total_bytes: 256 * 1024,
            chunk_bytes: 64 * 1024,
            ..StorageBenchConfig::default()
        }
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    #[test]
    fn at_both_baselines_is_100() {
        let config = StorageBenchConfig::default();
        assert_eq!(score_throughput(200.0, 400.0, &config), 100);
    }

    #[test]
    fn half_of_each_baseline_is_50() {
        let config = StorageBenchConfig::default();
        assert_eq!(score_throughput(100.0, 200.0, &config), 50);
    }

    #[test]
    fn ratios_clamp_independently() {
        let config = StorageBenchConfig::default();
        // Write at baseline, read 10x baseline: read clamps to 1.0, the
        // average is (1.0 + 1.0) / 2, not inflated past 100.
        assert_eq!(score_throughput(200.0, 4000.0, &config), 100);
        // Slow write is not masked by a fast read: (0.5 + 1.0) / 2 = 75.
        assert_eq!(score_throughput(100.0, 4000.0, &config), 75);
    }

    #[test]
    fn bad_throughput_is_unknown() {
        let config = StorageBenchConfig::default();
        assert_eq!(score_throughput(-1.0, 400.0, &config), UNKNOWN_SCORE);
        assert_eq!(score_throughput(f64::NAN, 400.0, &config), UNKNOWN_SCORE);
        assert_eq!(score_throughput(200.0, 0.0, &config), UNKNOWN_SCORE);
    }

    // -----------------------------------------------------------------------
    // Benchmark runs
    // -----------------------------------------------------------------------

    #[test]
    fn benchmark_produces_score_and_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_storage_benchmark(tmp.path(), &small_config());

        assert!((0..=100).contains(&result.speed_pct));
        assert!(result.write_mbps > 0.0);
        assert!(result.read_mbps > 0.0);
        assert!(!tmp.path().join(SCRATCH_FILE_NAME).exists());
    }

    #[test]
    fn failing_write_is_unknown_and_leaves_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("no_such_dir");

        let result = run_storage_benchmark(&missing, &small_config());
        assert_eq!(result.speed_pct, UNKNOWN_SCORE);
        assert_eq!(result.write_mbps, -1.0);
        assert_eq!(result.read_mbps, -1.0);
        assert!(!missing.join(SCRATCH_FILE_NAME).exists());
    }

    #[test]
    fn probe_trait_reports_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = StorageProbe::new(tmp.path(), small_config());
        assert_eq!(probe.name(), "storage_throughput");
        assert_eq!(probe.info().category, ProbeCategory::Storage);
        assert!(probe.is_available());
    }

    // -----------------------------------------------------------------------
    // Volume stats
    // -----------------------------------------------------------------------

    #[test]
    fn volume_stats_on_real_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let stats = volume_stats(tmp.path());
        assert!(stats.total_bytes > 0);
        assert!(stats.free_bytes >= 0);
        assert!(stats.free_bytes <= stats.total_bytes);
    }

    #[test]
    fn volume_stats_missing_path_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let stats = volume_stats(&tmp.path().join("nowhere"));
        assert_eq!(stats, VolumeStats::absent());
    }

    #[test]
    fn unreadable_and_absent_are_distinct() {
        assert_ne!(VolumeStats::unreadable(), VolumeStats::absent());
    }
}
