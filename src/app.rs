use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::SaveMode;
use crate::config::{RxmonConfig, SamplingConfig};
use crate::export;
use crate::input;
use crate::report::AggregateReport;
use crate::sampler::{self, SampleCollection};
use crate::system::cpu::CpuSource;
use crate::system::gpu::{GpuAdapter, GpuCapability};
use crate::ui::{self, status_line, summary};

/// Turn the probed capability into an adapter, or `None` when the run
/// must not start (no GPU and `require_gpu` set).
pub fn preflight<W: Write>(capability: GpuCapability, require_gpu: bool, out: &mut W) -> io::Result<Option<GpuAdapter>> {
    if let GpuCapability::Missing { reason } = &capability {
        writeln!(out)?;
        ui::print_lines(out, &summary::gpu_guidance(reason))?;
        if require_gpu {
            info!(%reason, "no GPU and require_gpu set, not monitoring");
            return Ok(None);
        }
        writeln!(out, "Continuando solo con CPU.")?;
    }
    Ok(Some(GpuAdapter::new(capability)))
}

/// Run the sampling loop, drawing the live status line to `out`
pub fn capture<C, W>(sampling: &SamplingConfig, cpu: &mut C, gpu: &mut GpuAdapter, out: &mut W) -> io::Result<SampleCollection>
where
    C: CpuSource + ?Sized,
    W: Write,
{
    writeln!(out)?;
    let gpu_name = gpu.capability().device_name().map(str::to_string);
    ui::print_lines(out, &summary::run_banner(sampling.duration.as_secs_f64(), gpu_name.as_deref()))?;

    let collection = sampler::monitor(sampling, cpu, gpu, |sample| {
        if let Err(e) = status_line::draw_status(&mut *out, sample) {
            debug!(error = %e, "status line not drawn");
        }
    });

    debug!(ticks = collection.len(), elapsed = ?collection.elapsed(), "capture complete");
    if gpu.failed_reads() > 0 {
        info!(failed = gpu.failed_reads(), "some GPU reads failed during the run");
    }
    writeln!(out, "\n")?;
    Ok(collection)
}

/// Print the averages and save the capture if asked to
pub fn finish<R, W>(
    collection: &SampleCollection,
    show_gpu: bool,
    cfg: &RxmonConfig,
    save_mode: SaveMode,
    input: &mut R,
    out: &mut W,
) -> Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
{
    let report = AggregateReport::from_collection(collection);
    ui::print_lines(out, &summary::report_lines(&report, show_gpu))?;

    let save = match save_mode {
        SaveMode::Always => true,
        SaveMode::Never => false,
        SaveMode::Ask => input::confirm_save(input, out)?,
    };
    if !save {
        return Ok(None);
    }

    let path = export::save(collection, cfg.output_dir(), &cfg.output_prefix)
        .with_context(|| format!("could not save capture into {}", cfg.output_dir().display()))?;
    writeln!(out, "Datos guardados en {}", path.display())?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::{FakeCpu, FakeGpuDevice, Script};
    use std::time::Duration;

    fn missing() -> GpuCapability {
        GpuCapability::Missing {
            reason: "no AMD GPU found".into(),
        }
    }

    #[test]
    fn missing_gpu_with_require_gpu_only_prints_guidance() {
        let mut out = Vec::new();
        let adapter = preflight(missing(), true, &mut out).unwrap();
        assert!(adapter.is_none());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("amdgpu no disponible: no AMD GPU found"));
        assert!(!text.contains("Continuando"));
    }

    #[test]
    fn missing_gpu_falls_back_to_cpu_only() {
        let mut out = Vec::new();
        let adapter = preflight(missing(), false, &mut out).unwrap();
        assert!(adapter.is_some());
        assert!(String::from_utf8(out).unwrap().contains("Continuando solo con CPU."));
    }

    #[test]
    fn detected_gpu_prints_nothing() {
        let device = FakeGpuDevice::new(Script::Value(1.0), Script::Value(2.0), Script::Value(3.0));
        let mut out = Vec::new();
        let adapter = preflight(GpuCapability::Detected(Box::new(device)), true, &mut out).unwrap();
        assert!(adapter.is_some());
        assert!(out.is_empty());
    }

    #[test]
    fn full_session_saves_when_told_to() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RxmonConfig {
            duration_secs: 0.2,
            interval_secs: 0.05,
            output_dir: Some(dir.path().to_path_buf()),
            ..RxmonConfig::default()
        };
        let sampling = cfg.sampling().unwrap();
        let device = FakeGpuDevice::new(Script::Value(30.0), Script::Unsupported, Script::Unsupported)
            .with_milliwatts(Script::Value(45000.0));
        let mut gpu = GpuAdapter::new(GpuCapability::Detected(Box::new(device)));
        let mut cpu = FakeCpu::new(vec![20.0], Duration::from_millis(5));
        let mut out = Vec::new();

        let collection = capture(&sampling, &mut cpu, &mut gpu, &mut out).unwrap();
        let path = finish(&collection, true, &cfg, SaveMode::Always, &mut io::empty(), &mut out)
            .unwrap()
            .expect("capture saved");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("GPU AMD detectada: Sí (Fake Radeon)"));
        assert!(text.contains("[CPU: 20.0% | GPU: 30% | Temp: N/A | Power: 45.0W]"));
        assert!(text.contains("- CPU: Utilización promedio: 20.00%"));
        assert!(text.contains("- GPU: No se pudo obtener temperatura"));
        assert!(text.contains("- GPU: Consumo de energía promedio: 45.00 W"));
        assert_eq!(export::load(&path).unwrap().len(), collection.len());
    }

    #[test]
    fn declined_prompt_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RxmonConfig {
            output_dir: Some(dir.path().to_path_buf()),
            ..RxmonConfig::default()
        };
        let mut out = Vec::new();
        let saved = finish(&SampleCollection::default(), false, &cfg, SaveMode::Ask, &mut "n\n".as_bytes(), &mut out).unwrap();
        assert!(saved.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
