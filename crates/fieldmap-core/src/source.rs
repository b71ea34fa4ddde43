//! Reading records from CSV.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::debug;

use crate::record::Record;

/// Errors from reading a record source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Reads one [`Record`] per CSV row, keyed by the header row.
///
/// A byte-order mark is stripped from header names. Cell values are kept
/// exactly as written; an empty cell becomes an empty (blank) value.
pub fn read_csv_records<R: io::Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(row.iter()) {
            record.insert(name.as_str(), value);
        }
        records.push(record);
    }
    debug!(columns = headers.len(), rows = records.len(), "read csv records");
    Ok(records)
}

pub fn read_csv_path(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_ordered_records() {
        let data = "\u{feff}CustomIdentifier,Label,Foo\n42,Foo,\n7, Bar ,x\n";
        let records = read_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first: Vec<_> = records[0].iter().collect();
        assert_eq!(
            first,
            [("CustomIdentifier", Some("42")), ("Label", Some("Foo")), ("Foo", Some(""))]
        );
        assert_eq!(records[1].get("Label"), Some(Some(" Bar ")));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let data = "A,B\n1,2,3\n";
        assert!(matches!(
            read_csv_records(data.as_bytes()),
            Err(SourceError::Csv(_))
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_csv_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
