//! Utility functions and helpers

pub mod formats;

pub use formats::{to_sprs_csr, to_sprs_triplets};
