use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::errors::IngestError;

/// Open a dataset file; the first row is always a header and is skipped
pub fn open_reader(path: &Path) -> Result<Reader<File>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

pub fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> IngestError + '_ {
    move |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// 1-based line of the record in its file
pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// Field value, `None` when the column is missing or blank
pub fn optional_field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|value| !value.is_empty())
}

pub fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    field: &'static str,
    path: &Path,
) -> Result<&'r str, IngestError> {
    optional_field(record, index).ok_or_else(|| IngestError::MalformedInput {
        path: path.to_path_buf(),
        line: line_of(record),
        field,
        value: record.get(index).unwrap_or_default().to_string(),
        reason: "value is missing".to_string(),
    })
}
