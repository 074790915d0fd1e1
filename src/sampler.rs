use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SamplingConfig;
use crate::system::cpu::CpuSource;
use crate::system::gpu::GpuAdapter;

/// One tick's record. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: String,
    pub cpu_util: f64,
    pub gpu_util: Option<f64>,
    pub gpu_temp: Option<f64>,
    pub gpu_power: Option<f64>,
}

/// Samples in tick order. Only this module appends to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleCollection {
    samples: Vec<Sample>,
    elapsed: Duration,
}

impl SampleCollection {
    /// Wrap samples that were collected elsewhere (e.g. a replayed capture)
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            elapsed: Duration::ZERO,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Wall-clock time from loop start to finalization
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Poll CPU and GPU until `config.duration` of wall-clock time has passed.
///
/// `on_tick` sees every sample right after it is recorded; it is only for
/// display and cannot alter the collection.
pub fn monitor<C, F>(config: &SamplingConfig, cpu: &mut C, gpu: &mut GpuAdapter, mut on_tick: F) -> SampleCollection
where
    C: CpuSource + ?Sized,
    F: FnMut(&Sample),
{
    let pause = config.interval.saturating_sub(cpu.sampling_window());
    let start = Instant::now();
    let mut samples = Vec::new();

    info!(duration = ?config.duration, interval = ?config.interval, "monitoring started");

    while start.elapsed() < config.duration {
        let cpu_util = cpu.sample();
        let gpu_readings = gpu.read_metrics();

        let sample = Sample {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            cpu_util,
            gpu_util: gpu_readings.utilization.value(),
            gpu_temp: gpu_readings.temperature.value(),
            gpu_power: gpu_readings.power.value(),
        };
        debug!(tick = samples.len() + 1, ?sample, "sample recorded");

        on_tick(&sample);
        samples.push(sample);

        thread::sleep(pause);
    }

    let elapsed = start.elapsed();
    info!(ticks = samples.len(), ?elapsed, "monitoring finished");

    SampleCollection { samples, elapsed }
}
