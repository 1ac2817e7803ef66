//! Block aggregation
//!
//! Single pass over the stored entries of a [`CoordinateMatrix`], counting
//! nonzeros per destination block.
//!
//! For symmetric storage an off-diagonal source entry `(i, j)` stands for
//! both `(i, j)` and `(j, i)`. When its block lies on the destination
//! diagonal the mirror lands in the same block, so the entry counts twice
//! here. Off-diagonal blocks are counted once and mirrored by the writer.
//! Stored blocks are kept in the lower triangle so that an entry given in
//! either triangle ends up in the same block.

use num_traits::Zero;
use tracing::{debug, instrument};

use crate::density::block::{ChannelCounts, DensityMap, COMBINED, IMAG, REAL};
use crate::density::config::DensityConfig;
use crate::density::grid::DestinationGrid;
use crate::error::Result;
use crate::matrix::banner::ValueDomain;
use crate::matrix::coo::{CoordinateMatrix, Entry};

/// Aggregates the nonzeros of `matrix` onto a destination grid
///
/// # Errors
///
/// * [`Error::Config`](crate::Error::Config) if `config.dst_rows` is zero or
///   exceeds the source row count.
/// * [`Error::Range`](crate::Error::Range) if a coordinate falls past the
///   grid and `config.bounds` is
///   [`BoundsPolicy::Reject`](crate::BoundsPolicy::Reject).
#[instrument(
    skip_all,
    fields(m = matrix.m, n = matrix.n, nnz = matrix.nnz(), dst_m = config.dst_rows)
)]
pub fn aggregate(matrix: &CoordinateMatrix, config: &DensityConfig) -> Result<DensityMap> {
    let grid = DestinationGrid::new(matrix.m, matrix.n, config.dst_rows, config.rounding)?;
    debug!(
        dst_n = grid.dst_n,
        m_rate = grid.m_rate,
        n_rate = grid.n_rate,
        "derived destination grid"
    );

    let symmetric = matrix.is_symmetric();
    let domain = matrix.domain();
    let mut map = DensityMap::new(grid, domain, symmetric);

    for entry in matrix.entries() {
        let mut coord = grid.map(entry.row, entry.col, config.bounds)?;
        if symmetric && coord.row < coord.col {
            coord = coord.transpose();
        }
        let count = if symmetric && coord.is_diagonal() && !entry.is_diagonal() {
            2
        } else {
            1
        };
        accumulate(map.counts_mut(coord), &entry, domain, count);
    }

    debug!(blocks = map.len(), "aggregation finished");
    Ok(map)
}

fn accumulate(counts: &mut ChannelCounts, entry: &Entry, domain: ValueDomain, count: u64) {
    match domain {
        ValueDomain::Real => {
            counts[REAL] += count;
        }
        ValueDomain::Complex => {
            if !entry.re.is_zero() {
                counts[REAL] += count;
            }
            if !entry.im.unwrap_or(0.0).is_zero() {
                counts[IMAG] += count;
            }
        }
    }
    counts[COMBINED] += count;
}
