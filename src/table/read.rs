// src/table/read.rs

use std::{fs, io::Cursor, path::Path};

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use tracing::debug;

use super::{Cell, RawTable};
use crate::error::EtlError;

/// How to decode a source file's bytes. The crime export still ships in a
/// legacy single-byte encoding; everything else is UTF-8. Both paths use
/// lossy replacement rather than failing on a stray byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

/// Load a delimited file into a `RawTable`.
///
/// `skip_rows` leading records are discarded (descriptive titles above the
/// structural header); the next record becomes the header row and the rest
/// become data rows, padded or truncated to the header width.
pub fn read_delimited(
    path: &Path,
    encoding: SourceEncoding,
    skip_rows: usize,
) -> Result<RawTable, EtlError> {
    let bytes = fs::read(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match encoding {
        SourceEncoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
        SourceEncoding::Windows1252 => WINDOWS_1252.decode(&bytes).0.into_owned(),
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // source rows do not always match the header width
        .from_reader(Cursor::new(text.into_bytes()));

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if idx < skip_rows {
            continue;
        }
        if idx == skip_rows {
            headers = record.iter().map(|s| s.trim().to_string()).collect();
            continue;
        }
        let mut row: Vec<Cell> = record.iter().map(Cell::from_field).collect();
        row.resize(headers.len(), Cell::Null);
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded delimited file"
    );
    Ok(RawTable { headers, rows })
}
