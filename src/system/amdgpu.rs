//! AMD GPU metrics via the Linux `amdgpu` sysfs interface.
//!
//! Files read, relative to `/sys/class/drm/cardN/device`:
//!   vendor                    — PCI vendor id, `0x1002` for AMD
//!   gpu_busy_percent          — utilization %
//!   hwmon/hwmonM/temp1_input  — edge temperature, millidegrees C
//!   hwmon/hwmonM/power1_input — instantaneous board power, microwatts (newer kernels)
//!   hwmon/hwmonM/power1_average — averaged board power, microwatts (Polaris / RX 400-500)
//!
//! A missing file means the metric is not exposed by this card/driver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GpuError;
use crate::system::gpu::{GpuCapability, GpuDevice};

const DRM_ROOT: &str = "/sys/class/drm";
const AMD_VENDOR_ID: &str = "0x1002";

pub struct AmdGpuDevice {
    name: String,
    device_dir: PathBuf,
    hwmon_dir: Option<PathBuf>,
}

impl AmdGpuDevice {
    fn hwmon_file(&self, file: &str, metric: &'static str) -> Result<PathBuf, GpuError> {
        self.hwmon_dir
            .as_ref()
            .map(|dir| dir.join(file))
            .ok_or(GpuError::Unsupported(metric))
    }
}

impl GpuDevice for AmdGpuDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn utilization(&mut self) -> Result<f64, GpuError> {
        read_value(&self.device_dir.join("gpu_busy_percent"), "utilization")
    }

    fn temperature(&mut self) -> Result<f64, GpuError> {
        let path = self.hwmon_file("temp1_input", "temperature")?;
        Ok(read_value(&path, "temperature")? / 1000.0)
    }

    fn power_watts(&mut self) -> Result<f64, GpuError> {
        let path = self.hwmon_file("power1_input", "power (W)")?;
        Ok(read_value(&path, "power (W)")? / 1_000_000.0)
    }

    fn power_milliwatts(&mut self) -> Result<f64, GpuError> {
        let path = self.hwmon_file("power1_average", "power (mW)")?;
        Ok(read_value(&path, "power (mW)")? / 1000.0)
    }
}

/// Probe the system DRM tree for the first AMD GPU
pub fn probe() -> GpuCapability {
    probe_at(Path::new(DRM_ROOT))
}

pub fn probe_at(drm_root: &Path) -> GpuCapability {
    let entries = match fs::read_dir(drm_root) {
        Ok(entries) => entries,
        Err(e) => {
            return GpuCapability::Missing {
                reason: format!("amdgpu sysfs interface not available ({}: {})", drm_root.display(), e),
            }
        }
    };

    let mut cards: Vec<(u32, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let index = name.to_str()?.strip_prefix("card")?.parse::<u32>().ok()?;
            Some((index, entry.path()))
        })
        .collect();
    cards.sort_by_key(|(index, _)| *index);

    for (index, card) in cards {
        let device_dir = card.join("device");
        let vendor = fs::read_to_string(device_dir.join("vendor")).unwrap_or_default();
        if vendor.trim() != AMD_VENDOR_ID {
            debug!(card = index, vendor = vendor.trim(), "skipping non-AMD card");
            continue;
        }

        let device_id = fs::read_to_string(device_dir.join("device")).unwrap_or_default();
        let hwmon_dir = find_hwmon(&device_dir);
        debug!(card = index, hwmon = ?hwmon_dir, "found AMD GPU");

        return GpuCapability::Detected(Box::new(AmdGpuDevice {
            name: format!("AMD Radeon (card{}, {})", index, device_id.trim()),
            device_dir,
            hwmon_dir,
        }));
    }

    GpuCapability::Missing {
        reason: "no AMD GPU found".to_string(),
    }
}

fn find_hwmon(device_dir: &Path) -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(device_dir.join("hwmon"))
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("hwmon"))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs.into_iter().next()
}

fn read_value(path: &Path, metric: &'static str) -> Result<f64, GpuError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        // Only an absent file (or ENOTSUP) marks the metric unsupported. A file
        // that exists but fails (EINVAL, ENODATA, EPERM on some APUs or a GPU in
        // runtime suspend) fails the whole read; the errno is logged by the adapter.
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::Unsupported) => {
            return Err(GpuError::Unsupported(metric));
        }
        Err(source) => {
            return Err(GpuError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value = text.trim();
    value.parse::<f64>().map_err(|_| GpuError::Parse {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}
