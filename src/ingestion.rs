use crate::error::Result;
use crate::schema::RawDataset;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads one booking-pace report export into a raw dataset.
///
/// Headers become the column list with surrounding whitespace trimmed, the
/// same cleanup the source system's exports need. Cell values are kept as
/// raw text; all coercion happens in the normalizer.
pub fn read_report<R: Read>(reader: R) -> Result<RawDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();

    let mut dataset = RawDataset::new(columns);
    for record in csv_reader.records() {
        let record = record?;
        dataset.push_row(record.iter().map(|cell| cell.to_string()).collect());
    }

    debug!(
        "Read report with {} columns and {} rows",
        dataset.columns().len(),
        dataset.row_count()
    );

    Ok(dataset)
}

pub fn read_report_file(path: impl AsRef<Path>) -> Result<RawDataset> {
    let file = File::open(path)?;
    read_report(file)
}
