use crate::constants::OUTPUT_HEADER;
use crate::error::Result;
use crate::types::CandidateRow;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

/// Writes `tic_id,cadence` rows. The header is always written, even for an
/// empty table.
pub fn write_rows<W: Write>(writer: W, rows: &[CandidateRow]) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(OUTPUT_HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

#[instrument(skip(path, rows), fields(path = %path.display(), rows = rows.len()))]
pub fn write_csv(path: &Path, rows: &[CandidateRow]) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let written = write_rows(file, rows)?;
    debug!("Wrote CSV output");
    Ok(written)
}
