use std::thread;
use std::time::Duration;

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};

/// Preferred blocking window used to average one CPU reading
pub const CPU_SAMPLING_WINDOW: Duration = Duration::from_millis(100);

/// Source of whole-machine CPU utilization.
///
/// `sample` blocks for `sampling_window` and returns the utilization averaged
/// over that window, in percent. The sampling loop subtracts the window from
/// its sleep so a tick still lasts about one interval.
pub trait CpuSource {
    fn sampling_window(&self) -> Duration;
    fn sample(&mut self) -> f64;
}

/// `sysinfo`-backed CPU source
pub struct SysinfoCpu {
    sys: System,
    window: Duration,
}

impl SysinfoCpu {
    pub fn new() -> Self {
        Self::with_window(CPU_SAMPLING_WINDOW)
    }

    /// The window is raised to `sysinfo`'s minimum update interval: a refresh
    /// sooner than that is skipped and would report the previous tick's usage.
    pub fn with_window(window: Duration) -> Self {
        let mut sys = System::new();
        // Baseline for the first delta
        sys.refresh_cpu_usage();
        Self {
            sys,
            window: window.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Whether `sysinfo` can read CPU counters on this OS at all
    pub fn is_supported() -> bool {
        sysinfo::IS_SUPPORTED_SYSTEM
    }
}

impl Default for SysinfoCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSource for SysinfoCpu {
    fn sampling_window(&self) -> Duration {
        self.window
    }

    fn sample(&mut self) -> f64 {
        // Restart the measurement so the value covers exactly this window
        self.sys.refresh_cpu_usage();
        thread::sleep(self.window);
        self.sys.refresh_cpu_usage();
        self.sys.global_cpu_usage() as f64
    }
}
