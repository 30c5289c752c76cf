//! Display helpers for sizes, resolutions and qualified values.

use std::fmt::Write;

use crate::types::Value;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const SIZE_BASE: f64 = 1000.0;

/// Human readable byte count using decimal units, e.g. `1500` → `"1.5 KB"`.
///
/// Anything at or beyond 1000 TB stays in TB.
pub fn format_size(bytes: Option<u64>) -> Option<String> {
    let bytes = bytes?;
    if bytes == 0 {
        return Some("0 B".to_string());
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= SIZE_BASE && unit < SIZE_UNITS.len() - 1 {
        scaled /= SIZE_BASE;
        unit += 1;
    }

    Some(format!("{} {}", trim_fraction(scaled), SIZE_UNITS[unit]))
}

/// Round to two decimals and drop trailing zeros: `1.50` → `1.5`, `2.00` → `2`.
fn trim_fraction(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Scalar proxy for a resolution string such as `"1920x1080"`.
///
/// Files with several video streams report a comma separated list; the
/// result is the mean area over every listed `WIDTHxHEIGHT` pair. A missing
/// or unparsable component counts as 1.
pub fn raw_resolution(resolution: Option<&str>) -> Option<f64> {
    let resolution = resolution?;

    let areas: Vec<f64> = resolution
        .split(',')
        .map(|pair| {
            let mut dims = pair.split('x').map(|d| d.trim().parse::<f64>().ok());
            let width = dims.next().flatten().unwrap_or(1.0);
            let height = dims.next().flatten().unwrap_or(1.0);
            width * height
        })
        .collect();

    Some(areas.iter().sum::<f64>() / areas.len() as f64)
}

/// Build `"[tertiary] primary (secondary)"`, leaving out falsy segments along
/// with their brackets.
pub fn format_qualified_value(primary: &Value, secondary: &Value, tertiary: Option<&Value>) -> String {
    let mut out = String::new();
    if let Some(tertiary) = tertiary.filter(|t| t.is_truthy()) {
        let _ = write!(out, "[{tertiary}] ");
    }
    let _ = write!(out, "{primary}");
    if secondary.is_truthy() {
        let _ = write!(out, " ({secondary})");
    }
    out.trim().to_string()
}
