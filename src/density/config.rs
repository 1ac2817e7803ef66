//! Configuration for density map generation

/// How the scaling rates of the destination grid are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridRounding {
    /// `m_rate = m / dst_m`; trailing source rows are folded into the last
    /// block by the bounds policy
    #[default]
    Floor,
    /// `m_rate = ceil(m / dst_m)`; every source coordinate lands inside the
    /// grid, the last block may be partially empty
    Ceil,
}

/// What to do with a coordinate that maps past the last destination block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Fold it into the last row/column of blocks
    #[default]
    Clamp,
    /// Fail with a range error
    Reject,
}

/// Configuration for the block aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityConfig {
    /// Number of destination block rows (`dst_m`)
    pub dst_rows: u32,

    /// Rate derivation used for the destination grid
    pub rounding: GridRounding,

    /// Handling of coordinates beyond the last block
    pub bounds: BoundsPolicy,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            // Resolution used by the plotting front end
            dst_rows: 120,
            rounding: GridRounding::Floor,
            bounds: BoundsPolicy::Clamp,
        }
    }
}

impl DensityConfig {
    /// Create a config for a given number of destination rows
    pub fn with_rows(dst_rows: u32) -> Self {
        Self {
            dst_rows,
            ..Self::default()
        }
    }

    /// Config reproducing the ceiling-based grid with strict bounds checks
    pub fn strict(dst_rows: u32) -> Self {
        Self {
            dst_rows,
            rounding: GridRounding::Ceil,
            bounds: BoundsPolicy::Reject,
        }
    }
}
