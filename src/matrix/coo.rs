//! Coordinate (COO) matrix model
//!
//! Stores the entries of a Matrix Market file exactly as they appear:
//! parallel index and value arrays, 0-based, one triangle only for
//! symmetric storage.

use std::fmt;

use crate::error::{Error, Result};
use crate::matrix::banner::{MatrixType, ValueDomain};

/// A sparse matrix in coordinate format
///
/// Built once by the reader (or [`CoordinateMatrix::new`]) and never
/// mutated afterwards.
#[derive(Clone)]
pub struct CoordinateMatrix {
    /// Number of rows in the matrix
    pub m: u32,

    /// Number of columns in the matrix
    pub n: u32,

    /// Type descriptor from the banner
    pub matrix_type: MatrixType,

    /// Row indices (size: nnz)
    pub rows: Vec<u32>,

    /// Column indices (size: nnz)
    pub cols: Vec<u32>,

    /// Real components (size: nnz)
    pub re: Vec<f64>,

    /// Imaginary components, present only for complex matrices (size: nnz)
    pub im: Option<Vec<f64>>,
}

/// One stored entry of a [`CoordinateMatrix`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub row: u32,
    pub col: u32,
    pub re: f64,
    pub im: Option<f64>,
}

impl Entry {
    /// True when the entry sits on the main diagonal of the source matrix
    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }
}

impl CoordinateMatrix {
    /// Creates a coordinate matrix from parallel arrays
    ///
    /// Returns a format error if the matrix type is not a real or complex
    /// coordinate matrix, if the arrays disagree in length, if `im` is given
    /// for a real matrix (or missing for a complex one), or if an index is
    /// out of bounds.
    pub fn new(
        m: u32,
        n: u32,
        matrix_type: MatrixType,
        rows: Vec<u32>,
        cols: Vec<u32>,
        re: Vec<f64>,
        im: Option<Vec<f64>>,
    ) -> Result<Self> {
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

        if matrix_type.is_symmetric() && m != n {
            return Err(Error::Format(format!(
                "Symmetric matrix must be square, got {}x{}",
                m, n
            )));
        }

        let nnz = rows.len();
        if cols.len() != nnz || re.len() != nnz {
            return Err(Error::Format(format!(
                "Index and value arrays differ in length ({}, {}, {})",
                nnz,
                cols.len(),
                re.len()
            )));
        }
        match (&im, domain) {
            (Some(im), ValueDomain::Complex) if im.len() != nnz => {
                return Err(Error::Format(format!(
                    "Imaginary array has {} entries, expected {}",
                    im.len(),
                    nnz
                )));
            }
            (None, ValueDomain::Complex) => {
                return Err(Error::Format(
                    "Complex matrix is missing imaginary components".to_string(),
                ));
            }
            (Some(_), ValueDomain::Real) => {
                return Err(Error::Format(
                    "Real matrix carries imaginary components".to_string(),
                ));
            }
            _ => {}
        }

        for (&row, &col) in rows.iter().zip(&cols) {
            if row >= m || col >= n {
                return Err(Error::Format(format!(
                    "Entry ({}, {}) out of bounds for a {}x{} matrix",
                    row, col, m, n
                )));
            }
        }

        Ok(Self {
            m,
            n,
            matrix_type,
            rows,
            cols,
            re,
            im,
        })
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    /// Value domain of the matrix
    pub fn domain(&self) -> ValueDomain {
        if self.im.is_some() {
            ValueDomain::Complex
        } else {
            ValueDomain::Real
        }
    }

    /// True when only one triangle is stored
    pub fn is_symmetric(&self) -> bool {
        self.matrix_type.is_symmetric()
    }

    /// Returns the `k`-th stored entry
    pub fn entry(&self, k: usize) -> Entry {
        Entry {
            row: self.rows[k],
            col: self.cols[k],
            re: self.re[k],
            im: self.im.as_ref().map(|im| im[k]),
        }
    }

    /// Iterates over the stored entries in file order
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        (0..self.nnz()).map(move |k| self.entry(k))
    }

    /// Number of stored entries on the main diagonal
    pub fn diagonal_count(&self) -> usize {
        self.rows
            .iter()
            .zip(&self.cols)
            .filter(|(row, col)| row == col)
            .count()
    }

    /// Number of entries in the logical (expanded) matrix
    ///
    /// Equals `nnz` for general storage and `2 * nnz - diagonal` when the
    /// second triangle is implied.
    pub fn logical_nnz(&self) -> usize {
        if self.is_symmetric() {
            2 * self.nnz() - self.diagonal_count()
        } else {
            self.nnz()
        }
    }
}

impl fmt::Debug for CoordinateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CoordinateMatrix {{")?;
        writeln!(f, "  type: {}", self.matrix_type)?;
        writeln!(f, "  dimensions: {} × {}", self.m, self.n)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_entries = 5.min(self.nnz());
        if max_entries > 0 {
            writeln!(f, "  content sample:")?;
            for entry in self.entries().take(max_entries) {
                match entry.im {
                    Some(im) => {
                        writeln!(f, "    ({}, {}) = {} + {}i", entry.row, entry.col, entry.re, im)?
                    }
                    None => writeln!(f, "    ({}, {}) = {}", entry.row, entry.col, entry.re)?,
                }
            }
            if self.nnz() > max_entries {
                writeln!(f, "    ... ({} more entries)", self.nnz() - max_entries)?;
            }
        }

        write!(f, "}}")
    }
}
