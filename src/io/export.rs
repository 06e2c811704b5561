//! CSV export of prediction results.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::predict::PredictionResult;

/// Column header for the prediction log.
const HEADER: &str = "timestamp,tavg_c,temperature_source,prior_hour_mw,predicted_mw";

/// Appends one prediction to a CSV log at `path`.
///
/// Creates the file with a header row when it does not exist yet; later
/// calls append data rows only. Produces deterministic output for identical
/// results.
///
/// # Errors
///
/// Returns an `io::Error` if the file cannot be opened or written.
pub fn append_to_log(result: &PredictionResult, path: &Path) -> io::Result<()> {
    let new_file = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = io::BufWriter::new(file);
    if new_file {
        writeln!(writer, "{HEADER}")?;
    }
    write_rows(std::slice::from_ref(result), &mut writer)?;
    writer.flush()
}

/// Writes a full prediction log (header plus one row per result) to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_log(results: &[PredictionResult], mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    write_rows(results, &mut writer)
}

fn write_rows(results: &[PredictionResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for r in results {
        wtr.write_record(&[
            r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.2}", r.tavg_c),
            r.temperature_source.to_string(),
            format!("{:.2}", r.prior_hour_mw),
            format!("{:.2}", r.predicted_demand_mw),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
