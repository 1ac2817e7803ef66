// Matrix data structures and Matrix Market input

pub mod banner;
pub mod coo;
pub mod market;

pub use banner::{Field, MatrixType, Object, Storage, Symmetry, ValueDomain};
pub use coo::{CoordinateMatrix, Entry};
pub use market::{read_matrix, read_matrix_from};
