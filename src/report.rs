//! Report rendering: a console table and a dated CSV file, both in candidate
//! order with the same five columns.

use crate::audit::Candidate;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Column headers, shared by the console table and the CSV header row.
pub const COLUMNS: [&str; 5] = [
    "DisplayName",
    "UserPrincipalName",
    "InactiveForDays",
    "HighCostLicense",
    "LastSignIn",
];

const REPORT_PREFIX: &str = "InactiveLicenseReport_";

fn row(candidate: &Candidate) -> [String; 5] {
    [
        candidate.display_name.clone(),
        candidate.user_principal_name.clone(),
        candidate.inactive_days_display(),
        candidate.matched_licenses.clone(),
        candidate.last_sign_in_display(),
    ]
}

/// Render the candidates as a plain table with columns sized to content.
pub fn render_table(candidates: &[Candidate]) -> String {
    let rows: Vec<[String; 5]> = candidates.iter().map(row).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &COLUMNS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in &rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Path of the report for a given run date: fixed prefix + ISO date + `.csv`,
/// inside `dir`.
pub fn report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{REPORT_PREFIX}{}.csv", date.format("%Y-%m-%d")))
}

/// Write the candidates as a CSV file at `path`: header row plus one record
/// per candidate, standard quoting. The caller decides whether to write at
/// all; an empty report file is never produced by the pipeline.
pub fn write_csv(candidates: &[Candidate], path: &Path) -> Result<()> {
    let wrap = |source: csv::Error| Error::ReportWrite {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(COLUMNS).map_err(wrap)?;
    for candidate in candidates {
        writer.write_record(row(candidate)).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(csv::Error::from(e)))?;
    Ok(())
}
