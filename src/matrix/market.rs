//! Matrix Market reader
//!
//! Reads a coordinate Matrix Market file into a [`CoordinateMatrix`],
//! converting the 1-based indices of the format to 0-based ones.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::banner::{MatrixType, ValueDomain};
use crate::matrix::coo::CoordinateMatrix;

/// Entries reserved up front; larger inputs grow as lines are read
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

/// Read a matrix in Matrix Market coordinate format from a file
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CoordinateMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::Io(e),
    })?;
    debug!(path = %path.display(), "reading matrix");
    read_matrix_from(BufReader::new(file))
}

/// Read a matrix in Matrix Market coordinate format from any buffered reader
pub fn read_matrix_from<R: BufRead>(reader: R) -> Result<CoordinateMatrix> {
    let mut lines = reader.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    // Banner must be the very first line
    let banner = match lines.next() {
        Some((_, line)) => line?,
        None => return Err(Error::Format("Matrix Market banner not found".to_string())),
    };
    let matrix_type = MatrixType::parse_banner(&banner)?;
    if !matrix_type.is_matrix() || !matrix_type.is_sparse() {
        return Err(Error::Format(format!(
            "Not a sparse matrix (matrix type: {})",
            matrix_type
        )));
    }
    let domain = matrix_type.domain().ok_or_else(|| {
        Error::Format(format!(
            "Not a real or complex matrix (matrix type: {})",
            matrix_type
        ))
    })?;
    debug!(%matrix_type, "parsed banner");

    // Skip comments and read header: rows cols nnz
    let mut header = None;
    let mut last_line = 1;
    for (line_no, line) in lines.by_ref() {
        let line = line?;
        last_line = line_no;
        if !is_skippable(&line) {
            header = Some((line_no, line));
            break;
        }
    }
    let (header_no, header) = header
        .ok_or_else(|| Error::parse(last_line + 1, "missing size line (rows cols nnz)"))?;
    let (m, n, nnz) = parse_size_line(header_no, &header)?;
    debug!(m, n, nnz, "parsed size line");

    let expected = nnz as usize;
    let capacity = expected.min(MAX_PREALLOCATED_ENTRIES);
    let mut rows = Vec::with_capacity(capacity);
    let mut cols = Vec::with_capacity(capacity);
    let mut re = Vec::with_capacity(capacity);
    let mut im = match domain {
        ValueDomain::Complex => Some(Vec::with_capacity(capacity)),
        ValueDomain::Real => None,
    };

    let expected_tokens = match domain {
        ValueDomain::Real => 3,
        ValueDomain::Complex => 4,
    };

    let mut last_line = header_no;
    while rows.len() < expected {
        let (line_no, line) = match lines.next() {
            Some((line_no, line)) => (line_no, line?),
            None => {
                return Err(Error::parse(
                    last_line + 1,
                    format!("expected {} entries, found {}", nnz, rows.len()),
                ))
            }
        };
        last_line = line_no;
        if is_skippable(&line) {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != expected_tokens {
            return Err(Error::parse(
                line_no,
                format!(
                    "expected {} fields for a {} entry, got {} in '{}'",
                    expected_tokens,
                    domain,
                    parts.len(),
                    line.trim()
                ),
            ));
        }

        // Convert from 1-indexed to 0-indexed
        let row = parse_index(line_no, parts[0], m, "row")?;
        let col = parse_index(line_no, parts[1], n, "column")?;
        let value = parse_value(line_no, parts[2])?;

        rows.push(row);
        cols.push(col);
        re.push(value);
        if let Some(im) = im.as_mut() {
            im.push(parse_value(line_no, parts[3])?);
        }
    }

    CoordinateMatrix::new(m, n, matrix_type, rows, cols, re, im)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('%')
}

fn parse_size_line(line_no: usize, line: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::parse(
            line_no,
            format!("invalid size line '{}', expected rows cols nnz", line.trim()),
        ));
    }

    let field = |idx: usize, what: &str| {
        parts[idx].parse::<u32>().map_err(|_| {
            Error::parse(line_no, format!("invalid number of {}: '{}'", what, parts[idx]))
        })
    };

    let (m, n, nnz) = (field(0, "rows")?, field(1, "columns")?, field(2, "non-zeros")?);
    if nnz as u64 > m as u64 * n as u64 {
        return Err(Error::parse(
            line_no,
            format!("{} non-zeros do not fit in a {}x{} matrix", nnz, m, n),
        ));
    }
    Ok((m, n, nnz))
}

fn parse_index(line_no: usize, token: &str, bound: u32, what: &str) -> Result<u32> {
    let index = token
        .parse::<u32>()
        .map_err(|_| Error::parse(line_no, format!("invalid {} index '{}'", what, token)))?;
    if index == 0 || index > bound {
        return Err(Error::parse(
            line_no,
            format!("{} index {} outside 1..={}", what, index, bound),
        ));
    }
    Ok(index - 1)
}

fn parse_value(line_no: usize, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::parse(line_no, format!("invalid value '{}'", token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn read_str(content: &str) -> Result<CoordinateMatrix> {
        read_matrix_from(Cursor::new(content))
    }

    fn read_real_general(body: &str) -> Result<CoordinateMatrix> {
        read_str(&format!("%%MatrixMarket matrix coordinate real general\n{}", body))
    }

    #[test]
    fn test_matrix_market_format() {
        let mtx_content = "%%MatrixMarket matrix coordinate real general\n\
                          % a comment\n\
                          3 3 5\n\
                          1 1 1.0\n\
                          1 3 2.0\n\
                          2 2 3.0\n\
                          3 1 4.0\n\
                          3 3 5.0\n";

        let matrix = read_str(mtx_content).unwrap();

        assert_eq!(matrix.m, 3);
        assert_eq!(matrix.n, 3);
        assert_eq!(matrix.nnz(), 5);
        assert_eq!(matrix.rows, vec![0, 0, 1, 2, 2]);
        assert_eq!(matrix.cols, vec![0, 2, 1, 0, 2]);
        assert_eq!(matrix.re, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(matrix.im.is_none());
    }

    #[test]
    fn test_complex_entries() {
        let matrix = read_str(
            "%%MatrixMarket matrix coordinate complex general\n\
             2 2 2\n\
             1 2 0.0 3.0\n\
             2 1 1.5 -2.0\n",
        )
        .unwrap();

        assert_eq!(matrix.domain(), ValueDomain::Complex);
        assert_eq!(matrix.im, Some(vec![3.0, -2.0]));
        assert_eq!(matrix.entry(0).row, 0);
        assert_eq!(matrix.entry(0).col, 1);
    }

    #[test]
    fn test_missing_banner() {
        let err = read_str("3 3 1\n1 1 1.0\n").unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let err = read_str("").unwrap_err();
        assert!(err.to_string().contains("banner not found"));
    }

    #[test]
    fn test_array_format_rejected() {
        let err = read_str("%%MatrixMarket matrix array real general\n2 2\n1.0\n");
        let err = err.unwrap_err();
        assert!(err.to_string().contains("Not a sparse matrix"));
    }

    #[test]
    fn test_integer_field_rejected() {
        let err = read_str("%%MatrixMarket matrix coordinate integer general\n1 1 1\n1 1 4\n");
        let err = err.unwrap_err();
        assert!(err.to_string().contains("Not a real or complex matrix"));
    }

    #[test]
    fn test_bad_size_line() {
        let err = read_real_general("3 3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_size_line_reports_next_line() {
        let err = read_real_general("").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = read_real_general("% only a comment\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
        assert!(err.to_string().contains("missing size line"));
    }

    #[test]
    fn test_impossible_entry_count_rejected() {
        let err = read_real_general("2 2 4000000000\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert!(err.to_string().contains("do not fit in a 2x2 matrix"));
    }

    #[test]
    fn test_huge_entry_count_fails_on_truncation() {
        // Plausible for the size, but far more entries than the file holds
        let err = read_real_general("100000 100000 4000000000\n1 1 1.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));
        assert!(err.to_string().contains("expected 4000000000 entries, found 1"));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = read_real_general("2 2 1\n3 1 1.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));

        let err = read_real_general("2 2 1\n0 1 1.0\n").unwrap_err();
        assert!(err.to_string().contains("outside 1..=2"));
    }

    #[test]
    fn test_truncated_data() {
        let err = read_real_general("2 2 2\n1 1 1.0\n").unwrap_err();
        assert!(err.to_string().contains("expected 2 entries, found 1"));
    }

    #[test]
    fn test_missing_imaginary_part() {
        let err = read_str("%%MatrixMarket matrix coordinate complex general\n2 2 1\n1 1 1.0\n");
        let err = err.unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "%%MatrixMarket matrix coordinate real symmetric\n3 3 2\n1 1 1.0\n3 1 2.0\n"
        )
        .unwrap();

        let matrix = read_matrix(temp_file.path()).unwrap();
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.logical_nnz(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = read_matrix("/definitely/not/here.mtx").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("not found"));
    }
}
