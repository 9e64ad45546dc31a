use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::BufWriter;

use crate::models::Lead;

/// Column labels, in row order. Must stay in sync with the field order of
/// `Lead`.
const HEADER: [&str; 12] = [
    "Company Name",
    "Domain",
    "Industry",
    "Company Size",
    "Contact Name",
    "Job Title",
    "Work Email",
    "LinkedIn URL (Contact)",
    "LinkedIn URL (Company)",
    "Source",
    "Email Status",
    "Last Verified Date",
];

/// Serialize the final lead sequence, overwriting any previous file. The
/// header row is written even when no leads were collected.
pub fn write_csv(path: &str, leads: &[Lead]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create output {}", path))?;
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    wtr.write_record(HEADER)?;
    for lead in leads {
        wtr.serialize(lead)?;
    }
    wtr.flush()?;
    Ok(())
}
