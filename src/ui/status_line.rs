use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::sampler::Sample;

const PLACEHOLDER: &str = "N/A";

fn or_placeholder(value: Option<f64>, unit: &str, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}{}", precision, v, unit),
        None => PLACEHOLDER.to_string(),
    }
}

/// `[CPU: 12.3% | GPU: 40% | Temp: 61°C | Power: 45.0W]`
pub fn format_status(sample: &Sample) -> String {
    format!(
        "[CPU: {:.1}% | GPU: {} | Temp: {} | Power: {}]",
        sample.cpu_util,
        or_placeholder(sample.gpu_util, "%", 0),
        or_placeholder(sample.gpu_temp, "°C", 0),
        or_placeholder(sample.gpu_power, "W", 1),
    )
}

/// Overwrite the current terminal line with the latest sample
pub fn draw_status<W: Write>(out: &mut W, sample: &Sample) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format_status(sample))
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(util: Option<f64>, temp: Option<f64>, power: Option<f64>) -> Sample {
        Sample {
            timestamp: "09:00:00".into(),
            cpu_util: 12.34,
            gpu_util: util,
            gpu_temp: temp,
            gpu_power: power,
        }
    }

    #[test]
    fn full_status_line() {
        let line = format_status(&sample(Some(40.0), Some(61.0), Some(45.04)));
        assert_eq!(line, "[CPU: 12.3% | GPU: 40% | Temp: 61°C | Power: 45.0W]");
    }

    #[test]
    fn missing_metrics_show_placeholder() {
        let line = format_status(&sample(None, None, None));
        assert_eq!(line, "[CPU: 12.3% | GPU: N/A | Temp: N/A | Power: N/A]");
    }

    #[test]
    fn zero_utilization_is_a_value() {
        assert!(format_status(&sample(Some(0.0), None, None)).contains("GPU: 0%"));
    }

    #[test]
    fn draw_writes_the_line() {
        let mut out = Vec::new();
        draw_status(&mut out, &sample(None, Some(50.0), None)).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.ends_with("[CPU: 12.3% | GPU: N/A | Temp: 50°C | Power: N/A]"));
    }
}
