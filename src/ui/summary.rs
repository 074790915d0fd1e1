//! Console text (Spanish) shown around a monitoring run.

use crate::report::{Aggregate, AggregateReport};

pub const TITLE: &str = "Sistema de Monitoreo para GPU AMD (serie RX)";
pub const SUBTITLE: &str = "Versión adaptada para RX 400 series";

pub fn run_banner(duration_secs: f64, gpu_name: Option<&str>) -> Vec<String> {
    vec![
        format!("Iniciando monitoreo por {} segundos...", duration_secs),
        match gpu_name {
            Some(name) => format!("GPU AMD detectada: Sí ({})", name),
            None => "GPU AMD detectada: No".to_string(),
        },
    ]
}

/// Installation hints when no AMD GPU could be probed
pub fn gpu_guidance(reason: &str) -> Vec<String> {
    vec![
        format!("amdgpu no disponible: {}", reason),
        "Instala el driver amdgpu para monitorear la GPU AMD".to_string(),
        "Asegúrate de que /sys/class/drm/card*/device exponga las métricas de la GPU".to_string(),
        "Reinicia después de instalar los drivers".to_string(),
    ]
}

pub fn missing_cpu_provider() -> Vec<String> {
    vec![
        "Error: este sistema operativo no permite leer el uso de CPU".to_string(),
        "rxmon necesita Linux, Windows, macOS, FreeBSD, Android o iOS".to_string(),
    ]
}

/// Final averages. GPU lines are only shown when a GPU took part in the run.
pub fn report_lines(report: &AggregateReport, show_gpu: bool) -> Vec<String> {
    let mut lines = vec!["Resultados finales:".to_string()];

    lines.push(match report.cpu_util {
        Aggregate::Mean(v) => format!("- CPU: Utilización promedio: {:.2}%", v),
        Aggregate::Unavailable => "- CPU: Sin muestras".to_string(),
    });

    if show_gpu {
        lines.push(match report.gpu_util {
            Aggregate::Mean(v) => format!("- GPU: Utilización promedio: {:.2}%", v),
            Aggregate::Unavailable => "- GPU: No se pudo obtener utilización".to_string(),
        });
        lines.push(match report.gpu_temp {
            Aggregate::Mean(v) => format!("- GPU: Temperatura promedio: {:.2}°C", v),
            Aggregate::Unavailable => "- GPU: No se pudo obtener temperatura".to_string(),
        });
        lines.push(match report.gpu_power {
            Aggregate::Mean(v) => format!("- GPU: Consumo de energía promedio: {:.2} W", v),
            Aggregate::Unavailable => {
                "- GPU: El consumo de energía no está disponible para este modelo".to_string()
            }
        });
    }

    lines
}
