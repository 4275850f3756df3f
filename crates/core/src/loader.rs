//! Load the input table (`class`, `name`, `email`) into [`Record`]s.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::{Record, PAIR_SEPARATOR};

/// Required header row, in order. `class` maps to the group, `email` to the address.
pub const EXPECTED_HEADERS: [&str; 3] = ["class", "name", "email"];

/// Error type for reading the input table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row is not exactly `class,name,email`.
    #[error(
        "Unexpected header row [{found_list}]; expected [{expected_list}]",
        found_list = .found.join(", "),
        expected_list = .expected.join(", ")
    )]
    HeaderMismatch { expected: Vec<String>, found: Vec<String> },

    /// A `name` or `email` value would break the `<giver> -> <receiver>` line format.
    #[error("Row {row}: {column} '{value}' contains ' -> ' or a line break")]
    ReservedSequence { row: usize, column: &'static str, value: String },

    /// A data row has a blank `class` value.
    #[error("Row {row} has an empty class value")]
    EmptyGroupKey { row: usize },
}

/// Convenience result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Read and parse the table at `path`.
pub fn load_records(path: &Path) -> LoadResult<Vec<Record>> {
    let file = fs::File::open(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let records = read_records(file)?;
    debug!(path = %path.display(), records = records.len(), "loaded input table");
    Ok(records)
}

/// Parse a comma-delimited table with a `class,name,email` header row.
///
/// Fields are trimmed. Names and addresses may not contain ` -> ` or line
/// breaks, since they are written one pair per line. Row numbers in errors are 1-based data rows (the header
/// is not counted).
pub fn read_records<R: Read>(reader: R) -> LoadResult<Vec<Record>> {
    let mut reader =
        csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let found: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if found.len() != EXPECTED_HEADERS.len()
        || found.iter().zip(EXPECTED_HEADERS).any(|(f, e)| f != e)
    {
        return Err(LoadError::HeaderMismatch {
            expected: EXPECTED_HEADERS.iter().map(|h| h.to_string()).collect(),
            found,
        });
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();
        let group = field(0);
        if group.is_empty() {
            return Err(LoadError::EmptyGroupKey { row: idx + 1 });
        }
        let (name, address) = (field(1), field(2));
        for (column, value) in [("name", &name), ("email", &address)] {
            if value.contains(PAIR_SEPARATOR) || value.contains(['\n', '\r']) {
                return Err(LoadError::ReservedSequence {
                    row: idx + 1,
                    column,
                    value: value.clone(),
                });
            }
        }
        records.push(Record { group, name, address });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_in_order() {
        let body = "class,name,email\n1A, Alice ,alice@example.com\n1B,Dan,dan@example.com\n";
        let records = read_records(body.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("1A", "Alice", "alice@example.com"),
                Record::new("1B", "Dan", "dan@example.com"),
            ]
        );
    }

    #[test]
    fn rejects_misnamed_columns() {
        let err = read_records("group,name,email\nA,Alice,a@x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::HeaderMismatch { .. }), "unexpected error: {err}");
    }

    #[test]
    fn rejects_pair_separator_in_name() {
        let body = "class,name,email\nA,Alice -> Bob,a@x\n";
        let err = read_records(body.as_bytes()).unwrap_err();
        assert!(
            matches!(err, LoadError::ReservedSequence { row: 1, column: "name", .. }),
            "unexpected error: {err}"
        );

        let body = "class,name,email\nA,Alice,\"a@x\nb@x\"\n";
        let err = read_records(body.as_bytes()).unwrap_err();
        assert!(
            matches!(err, LoadError::ReservedSequence { column: "email", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_blank_class() {
        let body = "class,name,email\nA,Alice,a@x\n ,Bob,b@x\n";
        let err = read_records(body.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyGroupKey { row: 2 }), "unexpected error: {err}");
    }
}
