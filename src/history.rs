use crate::dataset::Dataset;
use crate::report::Report;
use chrono::prelude::*;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const HEADER: &str = "date,name,observations,target,mean,median,std_dev,gap,pct_above_target";

pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cacstat").map(|dirs| dirs.config_dir().join("log.csv"))
}

// names may carry commas, so they are quoted
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn row(report: &Report, dataset: &Dataset) -> String {
    format!(
        "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
        quote(&Local::now().format("%c").to_string()),
        quote(&dataset.name),
        report.rows().len(),
        report.target(),
        report.mean(),
        report.median(),
        report.std_dev(),
        report.aggregate_gap(),
        report.aggregate_pct_above_target(),
    )
}

/// appends the run to the csv at `log_path`, writing the header for a new file
pub fn append(report: &Report, dataset: &Dataset, log_path: &Path) -> io::Result<()> {
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // If the log file doesn't exist, we need to emit a header
    let needs_header = !log_path.exists();

    let mut log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_path)?;

    if needs_header {
        writeln!(log_file, "{}", HEADER)?;
    }

    writeln!(log_file, "{}", row(report, dataset))?;

    Ok(())
}
