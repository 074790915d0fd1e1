//! rxmon — time-boxed CPU and AMD GPU telemetry sampler.
//!
//! Polls whole-machine CPU usage and, when an amdgpu device is present, GPU
//! utilization, temperature and board power once per interval for a fixed
//! duration. Prints a live status line, the per-metric averages at the end,
//! and optionally saves the samples as CSV.

mod app;
mod cli;
mod config;
mod error;
mod export;
mod input;
mod report;
mod sampler;
mod system;
#[cfg(test)]
mod testing;
mod ui;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use report::AggregateReport;
use system::amdgpu;
use system::cpu::SysinfoCpu;

const DEFAULT_LOG_FILTER: &str = "rxmon=warn";

fn main() -> Result<()> {
    // Diagnostics go to stderr so they don't mix with the status line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", ui::summary::TITLE)?;
    writeln!(out, "{}\n", ui::summary::SUBTITLE)?;

    if let Some(path) = &cli.replay {
        let collection = export::load(path).with_context(|| format!("could not read {}", path.display()))?;
        let report = AggregateReport::from_collection(&collection);
        let show_gpu = report.gpu_util.mean().is_some()
            || report.gpu_temp.mean().is_some()
            || report.gpu_power.mean().is_some();
        ui::print_lines(&mut out, &ui::summary::report_lines(&report, show_gpu))?;
        return Ok(());
    }

    writeln!(out, "Verificando dependencias...")?;
    if !SysinfoCpu::is_supported() {
        ui::print_lines(&mut out, &ui::summary::missing_cpu_provider())?;
        return Ok(());
    }

    let cfg = cli.resolve_config();
    let sampling = cfg.sampling().context("invalid monitoring configuration")?;

    let capability = amdgpu::probe();
    let show_gpu = capability.is_detected();
    let Some(mut gpu) = app::preflight(capability, cfg.require_gpu, &mut out)? else {
        return Ok(());
    };

    let mut cpu = SysinfoCpu::new();
    let collection = app::capture(&sampling, &mut cpu, &mut gpu, &mut out)?;

    let stdin = io::stdin();
    app::finish(&collection, show_gpu, &cfg, cli.save_mode(), &mut stdin.lock(), &mut out)?;

    Ok(())
}
