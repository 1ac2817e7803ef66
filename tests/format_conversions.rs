//! Integration tests for format conversions with external libraries

use std::io::Cursor;

use mtx_density::utils::{to_sprs_csr, to_sprs_triplets};
use mtx_density::{read_matrix_from, CoordinateMatrix};

/// Reads a 5x5 test matrix with a specific pattern:
/// [ 1.0  0.0  2.0  0.0  0.0 ]
/// [ 0.0  3.0  0.0  0.0  4.0 ]
/// [ 0.0  0.0  5.0  0.0  0.0 ]
/// [ 6.0  0.0  0.0  7.0  0.0 ]
/// [ 0.0  0.0  8.0  0.0  9.0 ]
fn create_test_matrix() -> CoordinateMatrix {
    read_matrix_from(Cursor::new(
        "%%MatrixMarket matrix coordinate real general\n\
         5 5 9\n\
         1 1 1.0\n\
         1 3 2.0\n\
         2 2 3.0\n\
         2 5 4.0\n\
         3 3 5.0\n\
         4 1 6.0\n\
         4 4 7.0\n\
         5 3 8.0\n\
         5 5 9.0\n",
    ))
    .unwrap()
}

#[test]
fn test_coordinate_to_sprs_conversion() {
    let matrix = create_test_matrix();

    let sprs_mat = to_sprs_csr(&matrix);

    // Verify dimensions and nnz
    assert_eq!(sprs_mat.rows(), 5);
    assert_eq!(sprs_mat.cols(), 5);
    assert_eq!(sprs_mat.nnz(), matrix.nnz());
    assert!(sprs_mat.is_csr());

    assert_eq!(sprs_mat.get(0, 0), Some(&1.0));
    assert_eq!(sprs_mat.get(0, 2), Some(&2.0));
    assert_eq!(sprs_mat.get(1, 4), Some(&4.0));
    assert_eq!(sprs_mat.get(3, 0), Some(&6.0));
    assert_eq!(sprs_mat.get(4, 4), Some(&9.0));

    // Check that zeros are really zeros
    assert_eq!(sprs_mat.get(0, 1), None);
    assert_eq!(sprs_mat.get(1, 0), None);
    assert_eq!(sprs_mat.get(2, 3), None);
}

#[test]
fn test_duplicate_entries_are_summed() {
    let matrix = read_matrix_from(Cursor::new(
        "%%MatrixMarket matrix coordinate real general\n\
         2 2 3\n\
         1 1 1.0\n\
         1 1 2.5\n\
         2 1 1.0\n",
    ))
    .unwrap();

    let triplets = to_sprs_triplets(&matrix);
    assert_eq!(triplets.nnz(), 3);

    let csr = to_sprs_csr(&matrix);
    assert_eq!(csr.nnz(), 2);
    assert_eq!(csr.get(0, 0), Some(&3.5));
}

#[test]
fn test_complex_keeps_real_parts() {
    let matrix = read_matrix_from(Cursor::new(
        "%%MatrixMarket matrix coordinate complex general\n\
         2 2 2\n\
         1 2 0.5 1.0\n\
         2 1 0.0 2.0\n",
    ))
    .unwrap();

    let csr = to_sprs_csr(&matrix);
    assert_eq!(csr.get(0, 1), Some(&0.5));
    // Structural entry kept even though its real part is zero
    assert_eq!(csr.get(1, 0), Some(&0.0));
}
