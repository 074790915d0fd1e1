use std::path::PathBuf;

use clap::Parser;

use crate::config::RxmonConfig;

#[derive(Parser, Debug)]
#[command(name = "rxmon", version)]
#[command(about = "Sample CPU and AMD GPU usage for a fixed time, then report averages", long_about = None)]
pub struct Cli {
    /// Total run length in seconds (default: 20)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Seconds between samples (default: 1)
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Directory for CSV captures (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// CSV file name prefix (default: rx460_monitor)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Exit instead of running CPU-only when no AMD GPU is found
    #[arg(long, conflicts_with = "allow_cpu_only")]
    pub require_gpu: bool,

    /// Run CPU-only when no AMD GPU is found, even if the config requires one
    #[arg(long)]
    pub allow_cpu_only: bool,

    /// Save the capture without asking
    #[arg(long, conflicts_with = "no_prompt")]
    pub save: bool,

    /// Never save, don't ask
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the averages of a saved CSV capture and exit
    #[arg(long, value_name = "CSV")]
    pub replay: Option<PathBuf>,

    /// Config file (default: <config dir>/rxmon/rxmonrc)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What to do with the capture once the run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Ask,
    Always,
    Never,
}

impl Cli {
    pub fn save_mode(&self) -> SaveMode {
        if self.save {
            SaveMode::Always
        } else if self.no_prompt {
            SaveMode::Never
        } else {
            SaveMode::Ask
        }
    }

    /// Load the config file and override it with flags given on the command line
    pub fn resolve_config(&self) -> RxmonConfig {
        let cfg = match &self.config {
            Some(path) => RxmonConfig::load_explicit(path),
            None => RxmonConfig::load(),
        };
        self.apply_to(cfg)
    }

    pub fn apply_to(&self, mut cfg: RxmonConfig) -> RxmonConfig {
        if let Some(duration) = self.duration {
            cfg.duration_secs = duration;
        }
        if let Some(interval) = self.interval {
            cfg.interval_secs = interval;
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = Some(dir.clone());
        }
        if let Some(prefix) = &self.prefix {
            cfg.output_prefix = prefix.clone();
        }
        if self.require_gpu {
            cfg.require_gpu = true;
        } else if self.allow_cpu_only {
            cfg.require_gpu = false;
        }
        cfg
    }
}
