use anyhow::{Context, Result};
use nix::sys::statvfs::statvfs;
use serde::Serialize;
use std::path::PathBuf;

const GIB: u64 = 1_073_741_824;

/// Capacity snapshot of the target volume, in whole gibibytes.
/// Overwritten in place on every poll cycle; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolumeStats {
    pub total_space:       u64,
    pub free_space:        u64,
    pub used_space:        u64,
    pub percent_used:      u8,
    pub percent_remaining: u8,
}

/// Samples capacity statistics for one fixed mount point.
#[derive(Debug)]
pub struct VolumeSampler {
    mount: PathBuf,
}

impl VolumeSampler {
    /// Resolves the target volume with a probe statvfs. Failure here is a
    /// configuration error; the caller must not enter the poll loop.
    pub fn new(mount: impl Into<PathBuf>) -> Result<Self> {
        let mount = mount.into();
        statvfs(&mount)
            .with_context(|| format!("cannot resolve volume at {}", mount.display()))?;
        Ok(Self { mount })
    }

    /// Overwrites `stats` with a fresh reading. On error the previous
    /// values are left untouched; the caller picks the failure policy.
    pub fn update(&self, stats: &mut VolumeStats) -> Result<()> {
        let stat = statvfs(&self.mount)
            .with_context(|| format!("statvfs failed for {}", self.mount.display()))?;

        let frsize = stat.fragment_size() as u64;
        let total_bytes = stat.blocks() * frsize;
        // Blocks available to unprivileged processes, not raw free blocks.
        let avail_bytes = stat.blocks_available() * frsize;

        *stats = compute_stats(total_bytes, avail_bytes);
        Ok(())
    }
}

/// Convert raw byte counts into the GiB/percentage snapshot.
/// `used + free == total` and `percent_used + percent_remaining == 100`
/// hold by construction.
pub fn compute_stats(total_bytes: u64, avail_bytes: u64) -> VolumeStats {
    let avail_bytes = avail_bytes.min(total_bytes);
    let used_bytes = total_bytes - avail_bytes;

    let percent_used = if total_bytes == 0 {
        0
    } else {
        (used_bytes as f64 / total_bytes as f64 * 100.0).round() as u8
    };

    let total_space = total_bytes / GIB;
    let free_space = avail_bytes / GIB;
    VolumeStats {
        total_space,
        free_space,
        used_space: total_space - free_space,
        percent_used,
        percent_remaining: 100 - percent_used,
    }
}
