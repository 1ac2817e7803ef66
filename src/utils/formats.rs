//! Utilities for converting the coordinate model to external libraries

use crate::matrix::CoordinateMatrix;
use sprs::{CsMat, TriMat};

/// Converts the stored entries of a coordinate matrix to an sprs triplet matrix
///
/// Only real parts are carried over. Symmetric storage is not expanded, so
/// the result holds the stored triangle.
pub fn to_sprs_triplets(matrix: &CoordinateMatrix) -> TriMat<f64> {
    let mut triplets = TriMat::with_capacity((matrix.m as usize, matrix.n as usize), matrix.nnz());
    for entry in matrix.entries() {
        triplets.add_triplet(entry.row as usize, entry.col as usize, entry.re);
    }
    triplets
}

/// Converts a coordinate matrix to sprs CSR format, summing duplicates
pub fn to_sprs_csr(matrix: &CoordinateMatrix) -> CsMat<f64> {
    to_sprs_triplets(matrix).to_csr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixType, Symmetry};

    #[test]
    fn test_triplet_conversion() {
        let matrix = CoordinateMatrix::new(
            3,
            4,
            MatrixType::real_general(),
            vec![0, 2, 1],
            vec![3, 0, 1],
            vec![1.0, 2.0, 3.0],
            None,
        )
        .unwrap();

        let triplets = to_sprs_triplets(&matrix);
        assert_eq!(triplets.rows(), 3);
        assert_eq!(triplets.cols(), 4);
        assert_eq!(triplets.nnz(), 3);

        let csr = to_sprs_csr(&matrix);
        assert!(csr.is_csr());
        assert_eq!(csr.get(0, 3), Some(&1.0));
        assert_eq!(csr.get(2, 0), Some(&2.0));
        assert_eq!(csr.get(1, 1), Some(&3.0));
        assert_eq!(csr.get(0, 0), None);
    }

    #[test]
    fn test_symmetric_keeps_stored_triangle() {
        let matrix = CoordinateMatrix::new(
            2,
            2,
            MatrixType::real_general().with_symmetry(Symmetry::Symmetric),
            vec![1],
            vec![0],
            vec![5.0],
            None,
        )
        .unwrap();

        let csr = to_sprs_csr(&matrix);
        assert_eq!(csr.get(1, 0), Some(&5.0));
        assert_eq!(csr.get(0, 1), None);
    }
}
