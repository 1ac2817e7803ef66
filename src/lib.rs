//! # mtx-density: block density maps for sparse matrices
//!
//! Summarizes the nonzero structure of very large Matrix Market matrices
//! without materializing them. The `m × n` index space is split into a
//! coarse grid of blocks and every block records how many nonzeros it holds.
//!
//! ## Pipeline
//!
//! 1. **Read**: [`read_matrix`] parses the banner, size line and coordinate
//!    entries into a [`CoordinateMatrix`] (0-based indices).
//! 2. **Aggregate**: [`aggregate`] derives the [`DestinationGrid`] and counts
//!    entries per block into a [`DensityMap`], with real, imaginary and
//!    combined channels.
//! 3. **Write**: [`write_density_map`] emits the header and one sorted line
//!    per block, mirroring off-diagonal blocks of symmetric matrices.
//!
//! ## Usage
//!
//! ```
//! use std::io::Cursor;
//! use mtx_density::{aggregate, read_matrix_from, write_density_map_to, DensityConfig};
//!
//! let mtx = "%%MatrixMarket matrix coordinate real general\n\
//!            4 4 4\n\
//!            1 1 1.0\n\
//!            2 2 1.0\n\
//!            3 4 1.0\n\
//!            4 3 1.0\n";
//! let matrix = read_matrix_from(Cursor::new(mtx)).unwrap();
//! let map = aggregate(&matrix, &DensityConfig::with_rows(2)).unwrap();
//!
//! let mut out = Vec::new();
//! write_density_map_to(&mut out, &map).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "real 4 4 2 2 2\n0 0 2 0 2\n1 1 2 0 2\n"
//! );
//! ```

pub mod density;
pub mod error;
pub mod matrix;
pub mod utils;

use std::path::Path;
use std::time::Instant;

use tracing::info;

// Re-export primary components
pub use density::{aggregate, write_density_map, write_density_map_to};
pub use density::{BlockCoord, BlockRow, Channel, ChannelCounts, DensityMap};
pub use density::{DensitySummary, DestinationGrid};
pub use density::{BoundsPolicy, DensityConfig, GridRounding};
pub use error::{Error, Result};
pub use matrix::{read_matrix, read_matrix_from, CoordinateMatrix, Entry, MatrixType, ValueDomain};
pub use utils::{to_sprs_csr, to_sprs_triplets};

/// Statistics of one completed conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    pub grid: DestinationGrid,
    /// Stored entries read from the input
    pub nnz: usize,
    /// Blocks written, mirrors included
    pub blocks: usize,
}

/// Reads `input`, aggregates it and writes the density map to `output`
///
/// This is the whole pipeline behind the `mtx-density` binary. Elapsed time
/// of each stage is logged at info level.
pub fn convert<P, Q>(input: P, output: Q, config: &DensityConfig) -> Result<ConversionReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let start = Instant::now();
    let matrix = read_matrix(input.as_ref())?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        m = matrix.m,
        n = matrix.n,
        nnz = matrix.nnz(),
        matrix_type = %matrix.matrix_type,
        "read matrix"
    );

    let start = Instant::now();
    let map = aggregate(&matrix, config)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        blocks = map.len(),
        "aggregated blocks"
    );

    let start = Instant::now();
    let blocks = write_density_map(output.as_ref(), &map)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, blocks, "wrote density map");

    Ok(ConversionReport {
        grid: *map.grid(),
        nnz: matrix.nnz(),
        blocks,
    })
}

/// Version information for the mtx-density library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
