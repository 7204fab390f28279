use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::scan::{scan_dir, Problem};

#[derive(Debug, Serialize)]
pub struct Report {
    pub files_checked: usize,
    pub valid: usize,
    pub problems: Vec<Problem>,
}

pub fn build_report(dir: &Path) -> Result<Report> {
    let entries = scan_dir(dir)?;
    let files_checked = entries.len();
    let problems: Vec<Problem> = entries
        .into_iter()
        .filter_map(|e| e.err())
        .collect();

    Ok(Report {
        files_checked,
        valid: files_checked - problems.len(),
        problems,
    })
}

/// Returns whether every post in `dir` is valid.
pub fn run(dir: &Path, format: OutputFormat) -> Result<bool> {
    let report = build_report(dir)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for p in &report.problems {
                match &p.field {
                    Some(field) => println!("{}: [{}] {}", p.path.display(), field, p.message),
                    None => println!("{}: {}", p.path.display(), p.message),
                }
            }
            println!(
                "{} files checked, {} valid, {} rejected",
                report.files_checked,
                report.valid,
                report.problems.len()
            );
        }
    }

    Ok(report.problems.is_empty())
}
