//! Console report for a [`Summary`].
//!
//! Supports human-readable text and JSON.

use std::io::{self, Write};

use crate::stats::Summary;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal output (default)
    #[default]
    Human,
    /// Pretty-printed JSON object
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s} (expected: human, json)")),
        }
    }
}

/// Write the summary as plain sentences followed by a per-year table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(writer, "Loaded {} earthquakes", summary.count)?;

    if let Some(max) = &summary.maximum {
        write!(
            writer,
            "The strongest earthquake was at {} with magnitude {}",
            max.location, max.magnitude
        )?;
        match &max.place {
            Some(place) => writeln!(writer, " {DIM}({place}){RESET}")?,
            None => writeln!(writer)?,
        }
    } else {
        writeln!(writer, "No earthquake magnitudes reported")?;
    }

    if summary.yearly_counts.is_empty() {
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "{BOLD}Year  Events  Avg mag{RESET}")?;
    for (year, n) in &summary.yearly_counts {
        let avg = summary
            .yearly_average_magnitude
            .get(year)
            .map_or_else(|| format!("{DIM}-{RESET}"), |m| format!("{m:.2}"));
        writeln!(writer, "{year}  {n:>6}  {avg:>7}")?;
    }
    Ok(())
}

/// Write the summary as a JSON object.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write the summary in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(writer: &mut W, summary: &Summary, format: Format) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, summary),
        Format::Json => write_json(writer, summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feature;

    fn render(summary: &Summary, format: Format) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, summary, format).expect("write to vec");
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<Format>().unwrap(), Format::Human);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("ndjson".parse::<Format>().is_err());
    }

    #[test]
    fn test_human_report() {
        let features = vec![
            feature(Some(4.5), 1_118_793_600_000, -3.0, 52.0),
            feature(Some(6.1), 1_276_560_000_000, 1.5, 55.5),
        ];
        let out = render(&Summary::from_features(&features), Format::Human);

        assert!(out.starts_with("Loaded 2 earthquakes\n"));
        assert!(out.contains("The strongest earthquake was at (55.5, 1.5) with magnitude 6.1"));
        assert!(out.contains("2005       1     4.50"));
    }

    #[test]
    fn test_human_report_without_data() {
        let out = render(&Summary::from_features(&[]), Format::Human);
        assert_eq!(out, "Loaded 0 earthquakes\nNo earthquake magnitudes reported\n");
    }

    #[test]
    fn test_human_report_zero_magnitude_event() {
        let features = vec![feature(Some(0.0), 1_118_793_600_000, 0.0, 0.0)];
        let out = render(&Summary::from_features(&features), Format::Human);

        assert!(out.contains("The strongest earthquake was at (0, 0) with magnitude 0"));
        assert!(!out.contains("No earthquake magnitudes reported"));
    }

    #[test]
    fn test_json_report_without_magnitudes() {
        let features = vec![feature(None, 1_118_793_600_000, 0.5, 51.0)];
        let out = render(&Summary::from_features(&features), Format::Json);

        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["count"], 1);
        assert!(value["maximum"].is_null());
    }

    #[test]
    fn test_json_report() {
        let features = vec![feature(Some(3.0), 1_118_793_600_000, 0.5, 51.0)];
        let out = render(&Summary::from_features(&features), Format::Json);

        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["count"], 1);
        assert_eq!(value["maximum"]["location"]["latitude"], 51.0);
        assert_eq!(value["yearly_counts"]["2005"], 1);
    }
}
