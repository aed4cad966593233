//! Yearly chart series and terminal rendering.
//!
//! The aggregates only hold years that had events; charts need a dense
//! x-axis, so the series here span every year from the first to the last.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::QuakeError;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[96m";
const RED: &str = "\x1b[91m";

const BAR: char = '█';
const MARKER: char = '●';

/// Default plot width in terminal columns.
pub const DEFAULT_WIDTH: usize = 50;

/// One x-axis slot of a yearly chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    /// `None` where the year has nothing to plot
    pub value: Option<f64>,
}

/// A titled, dense, year-indexed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    pub title: String,
    pub y_label: String,
    pub points: Vec<YearPoint>,
}

impl YearSeries {
    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.value)
    }
}

/// Fill every year between the first and last key, using `fill` for gaps.
fn dense<V: Copy>(
    map: &BTreeMap<i32, V>,
    to_value: impl Fn(V) -> f64,
    fill: Option<f64>,
) -> Vec<YearPoint> {
    let (Some(first), Some(last)) = (map.keys().next(), map.keys().next_back()) else {
        return Vec::new();
    };
    (*first..=*last)
        .map(|year| YearPoint {
            year,
            value: map.get(&year).map(|v| to_value(*v)).or(fill),
        })
        .collect()
}

/// Bar chart data for events per year; missing years count as zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn count_series(counts: &BTreeMap<i32, usize>) -> YearSeries {
    YearSeries {
        title: "Earthquake Frequency per Year".into(),
        y_label: "Number of Earthquakes".into(),
        points: dense(counts, |n| n as f64, Some(0.0)),
    }
}

/// Line chart data for average magnitude per year; missing years are gaps.
#[must_use]
pub fn average_series(averages: &BTreeMap<i32, f64>) -> YearSeries {
    YearSeries {
        title: "Average Earthquake Magnitude per Year".into(),
        y_label: "Average Magnitude".into(),
        points: dense(averages, |m| m, None),
    }
}

/// Scale `value` in `[lo, hi]` onto `0..=width` columns.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale(value: f64, lo: f64, hi: f64, width: usize) -> usize {
    if hi <= lo {
        return width;
    }
    let frac = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (frac * width as f64).round() as usize
}

/// Draw a horizontal bar chart, one row per year.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_bars<W: Write>(writer: &mut W, series: &YearSeries, width: usize) -> io::Result<()> {
    writeln!(writer, "{BOLD}{}{RESET}", series.title)?;
    if series.points.is_empty() {
        return writeln!(writer, "{DIM}(no data){RESET}");
    }

    let max = series.values().fold(0.0_f64, f64::max);
    for point in &series.points {
        let value = point.value.unwrap_or(0.0);
        let bar: String = std::iter::repeat_n(BAR, scale(value, 0.0, max, width)).collect();
        writeln!(writer, "{} │{CYAN}{bar}{RESET} {value}", point.year)?;
    }
    writeln!(writer, "{DIM}{}{RESET}", series.y_label)
}

/// Draw a sideways line chart: one row per year, a marker at the value.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_line<W: Write>(writer: &mut W, series: &YearSeries, width: usize) -> io::Result<()> {
    writeln!(writer, "{BOLD}{}{RESET}", series.title)?;
    if series.points.is_empty() {
        return writeln!(writer, "{DIM}(no data){RESET}");
    }

    let lo = series.values().fold(f64::INFINITY, f64::min);
    let hi = series.values().fold(f64::NEG_INFINITY, f64::max);
    for point in &series.points {
        match point.value {
            Some(value) => {
                let pad = " ".repeat(scale(value, lo, hi, width));
                writeln!(
                    writer,
                    "{} │{pad}{RED}{MARKER}{RESET} {value:.2}",
                    point.year
                )?;
            }
            None => writeln!(writer, "{} │{DIM}·{RESET}", point.year)?,
        }
    }
    writeln!(
        writer,
        "{DIM}{} ({lo:.2} .. {hi:.2}){RESET}",
        series.y_label
    )
}

/// Export series as pretty JSON for an external plotting tool.
///
/// # Errors
///
/// Returns [`QuakeError::Serialize`] if encoding fails and
/// [`QuakeError::Persistence`] if the file cannot be written.
pub fn write_series_json(path: &Path, series: &[YearSeries]) -> Result<(), QuakeError> {
    let json = serde_json::to_string_pretty(series).map_err(QuakeError::Serialize)?;
    fs::write(path, json).map_err(|source| QuakeError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to vec");
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn test_count_series_zero_fills() {
        let counts = BTreeMap::from([(2005, 1), (2008, 3)]);
        let series = count_series(&counts);
        let values: Vec<_> = series.points.iter().map(|p| (p.year, p.value)).collect();
        assert_eq!(
            values,
            vec![
                (2005, Some(1.0)),
                (2006, Some(0.0)),
                (2007, Some(0.0)),
                (2008, Some(3.0)),
            ]
        );
    }

    #[test]
    fn test_average_series_leaves_gaps() {
        let averages = BTreeMap::from([(2010, 2.5), (2012, 3.5)]);
        let series = average_series(&averages);
        assert_eq!(series.points.len(), 3);
        assert_eq!(series.points[1].value, None);
    }

    #[test]
    fn test_empty_series() {
        let series = count_series(&BTreeMap::new());
        assert!(series.points.is_empty());
        let out = render(|w| render_bars(w, &series, 10));
        assert!(out.contains("(no data)"));
    }

    #[test]
    fn test_render_bars_scales_to_width() {
        let series = count_series(&BTreeMap::from([(2001, 2), (2002, 4)]));
        let out = render(|w| render_bars(w, &series, 10));

        let rows: Vec<&str> = out.lines().filter(|l| l.starts_with("200")).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].matches(BAR).count(), 5);
        assert_eq!(rows[1].matches(BAR).count(), 10);
    }

    #[test]
    fn test_render_line_marks_every_year() {
        let series = average_series(&BTreeMap::from([(2001, 2.0), (2003, 4.0)]));
        let out = render(|w| render_line(w, &series, 8));

        assert!(out.contains("Average Earthquake Magnitude per Year"));
        assert_eq!(out.matches(MARKER).count(), 2);
        assert!(out.contains("2002 │"));
        assert!(out.contains("4.00"));
    }

    #[test]
    fn test_write_series_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("series.json");
        let series = count_series(&BTreeMap::from([(2005, 1)]));

        write_series_json(&path, &[series]).expect("export succeeds");

        let text = fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value[0]["points"][0]["year"], 2005);
        assert_eq!(value[0]["points"][0]["value"], 1.0);
    }
}
