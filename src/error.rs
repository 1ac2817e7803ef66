//! Error types for the density pipeline
//!
//! Every stage returns [`Result`]; nothing below `main` terminates the
//! process.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error raised while reading, aggregating or writing a density map
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run parameters (destination row count, arguments)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Input is missing or is not a real/complex sparse Matrix Market file
    #[error("Format error: {0}")]
    Format(String),

    /// Size header or data row could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A source coordinate mapped outside the destination grid
    #[error(
        "Coordinate ({row}, {col}) maps to block ({dst_i}, {dst_j}) \
         outside the {dst_m}x{dst_n} grid"
    )]
    Range {
        row: u32,
        col: u32,
        dst_i: u32,
        dst_j: u32,
        dst_m: u32,
        dst_n: u32,
    },

    /// The density map could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a parse failure on a given (1-based) line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an error for an input file that does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::Format(format!("File {} not found", path.display()))
    }

    /// Wrap a failure writing to the output `path`
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the error concerns the output file rather than the input
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
