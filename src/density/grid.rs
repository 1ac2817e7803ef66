//! Destination grid derivation and coordinate mapping
//!
//! The source `m × n` index space is divided into `dst_m × dst_n` blocks.
//! Each destination row covers `m_rate` source rows and each destination
//! column covers `n_rate` source columns; `dst_n` is chosen so the grid keeps
//! roughly the aspect ratio of the source.

use crate::density::block::BlockCoord;
use crate::density::config::{BoundsPolicy, GridRounding};
use crate::error::{Error, Result};

/// Geometry of the destination grid for one source matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationGrid {
    /// Source rows
    pub src_m: u32,
    /// Source columns
    pub src_n: u32,
    /// Destination block rows
    pub dst_m: u32,
    /// Destination block columns
    pub dst_n: u32,
    /// Source rows per destination row
    pub m_rate: u32,
    /// Source columns per destination column
    pub n_rate: u32,
}

impl DestinationGrid {
    /// Derives the grid for an `m × n` source and `dst_m` destination rows
    ///
    /// `dst_m` must lie in `1..=m`.
    pub fn new(m: u32, n: u32, dst_m: u32, rounding: GridRounding) -> Result<Self> {
        if dst_m == 0 {
            return Err(Error::Config(
                "Destination row count must be positive".to_string(),
            ));
        }
        if dst_m > m {
            return Err(Error::Config(format!(
                "Destination row count {} exceeds the {} source rows",
                dst_m, m
            )));
        }

        // Products in u64: dst_m * n overflows u32 for large matrices
        let (m64, n64, dst_m64) = (m as u64, n as u64, dst_m as u64);
        let (dst_n, m_rate, n_rate) = match rounding {
            GridRounding::Floor => {
                let dst_n = (dst_m64 * n64 / m64).max(1);
                let m_rate = m64 / dst_m64;
                let n_rate = (n64 / dst_n).max(1);
                (dst_n, m_rate, n_rate)
            }
            GridRounding::Ceil => {
                let dst_n = ((dst_m64 * n64 + m64 - 1) / m64).max(1);
                let m_rate = (m64 + dst_m64 - 1) / dst_m64;
                let n_rate = ((n64 + dst_n - 1) / dst_n).max(1);
                (dst_n, m_rate, n_rate)
            }
        };

        // Each value is bounded by m or n, so the narrowing is lossless
        Ok(Self {
            src_m: m,
            src_n: n,
            dst_m,
            dst_n: dst_n as u32,
            m_rate: m_rate as u32,
            n_rate: n_rate as u32,
        })
    }

    /// Number of source cells covered by one block
    pub fn block_area(&self) -> u64 {
        self.m_rate as u64 * self.n_rate as u64
    }

    /// Maps a 0-based source coordinate to its destination block
    ///
    /// Coordinates past the last block are clamped or rejected according to
    /// `policy`.
    pub fn map(&self, row: u32, col: u32, policy: BoundsPolicy) -> Result<BlockCoord> {
        let dst_i = row / self.m_rate;
        let dst_j = col / self.n_rate;

        if dst_i < self.dst_m && dst_j < self.dst_n {
            return Ok(BlockCoord::new(dst_i, dst_j));
        }

        match policy {
            BoundsPolicy::Clamp => Ok(BlockCoord::new(
                dst_i.min(self.dst_m - 1),
                dst_j.min(self.dst_n - 1),
            )),
            BoundsPolicy::Reject => Err(Error::Range {
                row,
                col,
                dst_i,
                dst_j,
                dst_m: self.dst_m,
                dst_n: self.dst_n,
            }),
        }
    }
}
