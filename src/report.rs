//! Presentation of estimates for the command line

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::runner::Estimate;

/// An estimate together with the file it belongs to
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub file: String,
    #[serde(flatten)]
    pub estimate: &'a Estimate,
}

impl<'a> FileReport<'a> {
    pub fn new(path: &Path, estimate: &'a Estimate) -> Self {
        Self {
            file: path.display().to_string(),
            estimate,
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &FileReport<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

fn render_text(report: &FileReport<'_>) -> String {
    let estimate = report.estimate;

    [
        report.file.clone(),
        format!("  lines processed: {}", estimate.lines_processed),
        format!("  distance:        {:.3}", estimate.total_distance),
        format!(
            "  time:            {} ({:.2} min)",
            format_duration(estimate.total_time),
            estimate.total_time / 60.0
        ),
        format!("  material used:   {:.3}", estimate.total_material_used),
        format!("  units:           {}", estimate.unit_system),
    ]
    .join("\n")
}

/// Format seconds as `h:mm:ss`
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (hours, rest) = (total / 3600, total % 3600);
    format!("{}:{:02}:{:02}", hours, rest / 60, rest % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{Position, UnitSystem};

    fn sample() -> Estimate {
        Estimate {
            lines_processed: 4,
            total_distance: 20.0,
            total_time: 3725.4,
            total_material_used: 1.5,
            unit_system: UnitSystem::Metric,
            final_position: Position::origin(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00:00");
        assert_eq!(format_duration(59.6), "0:01:00");
        assert_eq!(format_duration(3725.4), "1:02:05");
    }

    #[test]
    fn test_render_text() {
        let estimate = sample();
        let report = FileReport::new(Path::new("part.gcode"), &estimate);
        let text = render(&report, OutputFormat::Text).unwrap();

        assert!(text.starts_with("part.gcode\n"));
        assert!(text.contains("lines processed: 4"));
        assert!(text.contains("distance:        20.000"));
        assert!(text.contains("1:02:05"));
        assert!(text.contains("material used:   1.500"));
        assert!(text.ends_with("units:           metric"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_render_json() {
        let estimate = sample();
        let report = FileReport::new(Path::new("part.gcode"), &estimate);
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file"], "part.gcode");
        assert_eq!(value["lines_processed"], 4);
        assert_eq!(value["total_distance"], 20.0);
        assert_eq!(value["unit_system"], "metric");
        assert_eq!(value["final_position"]["x"], 0.0);
    }
}
