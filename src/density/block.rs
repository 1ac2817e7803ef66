//! Block coordinates, channel counts and the density map container

use std::collections::btree_map::{self, BTreeMap};

use crate::density::grid::DestinationGrid;
use crate::matrix::banner::ValueDomain;

/// Coordinate of a block in the destination grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockCoord {
    pub row: u32,
    pub col: u32,
}

impl BlockCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Packs the coordinate into one key, row in the high 32 bits
    ///
    /// Packed keys order the same way as `(row, col)` pairs.
    pub const fn pack(self) -> u64 {
        (self.row as u64) << 32 | self.col as u64
    }

    pub const fn unpack(key: u64) -> Self {
        Self {
            row: (key >> 32) as u32,
            col: key as u32,
        }
    }

    /// Coordinate mirrored across the main diagonal
    pub const fn transpose(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        self.row == self.col
    }
}

/// Index of the channel counting entries with a nonzero real part
pub const REAL: usize = 0;
/// Index of the channel counting entries with a nonzero imaginary part
pub const IMAG: usize = 1;
/// Index of the channel counting every stored entry
pub const COMBINED: usize = 2;

/// Per-block counts: `[real, imag, combined]`
pub type ChannelCounts = [u64; 3];

/// One of the three count channels of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Real,
    Imag,
    Combined,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Real, Channel::Imag, Channel::Combined];

    /// Position of the channel in [`ChannelCounts`]
    pub const fn index(self) -> usize {
        match self {
            Channel::Real => REAL,
            Channel::Imag => IMAG,
            Channel::Combined => COMBINED,
        }
    }
}

/// One line of a density map: block coordinate and its counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRow {
    pub coord: BlockCoord,
    pub counts: ChannelCounts,
}

/// Aggregated nonzero counts per destination block
///
/// For symmetric storage only one triangle of blocks is held; the mirrored
/// blocks are produced by [`DensityMap::rows`].
#[derive(Debug, Clone)]
pub struct DensityMap {
    grid: DestinationGrid,
    domain: ValueDomain,
    symmetric: bool,
    blocks: BTreeMap<u64, ChannelCounts>,
}

impl DensityMap {
    /// Creates an empty map over `grid`
    pub fn new(grid: DestinationGrid, domain: ValueDomain, symmetric: bool) -> Self {
        Self {
            grid,
            domain,
            symmetric,
            blocks: BTreeMap::new(),
        }
    }

    pub fn grid(&self) -> &DestinationGrid {
        &self.grid
    }

    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    /// True when the map was built from one-triangle storage
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Counts of a stored block, zero-initialized on first access
    pub fn counts_mut(&mut self, coord: BlockCoord) -> &mut ChannelCounts {
        self.blocks.entry(coord.pack()).or_insert([0; 3])
    }

    /// Counts of a stored block
    ///
    /// Mirrored blocks of a symmetric map are not stored; use
    /// [`DensityMap::rows`] for the full view.
    pub fn get(&self, coord: BlockCoord) -> Option<&ChannelCounts> {
        self.blocks.get(&coord.pack())
    }

    /// Number of stored blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over the stored blocks in `(row, col)` order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.blocks.iter(),
        }
    }

    /// All blocks of the logical map, sorted by `(row, col)`
    ///
    /// For symmetric storage every off-diagonal block is emitted twice: once
    /// as stored and once transposed with identical counts.
    pub fn rows(&self) -> Vec<BlockRow> {
        let mut rows: Vec<BlockRow> = self.iter().collect();
        if self.symmetric {
            let mirrored: Vec<BlockRow> = rows
                .iter()
                .filter(|row| !row.coord.is_diagonal())
                .map(|row| BlockRow {
                    coord: row.coord.transpose(),
                    counts: row.counts,
                })
                .collect();
            rows.extend(mirrored);
            rows.sort_by_key(|row| row.coord);
        }
        rows
    }

    /// Sum of one channel over the logical map
    pub fn total(&self, channel: Channel) -> u64 {
        let idx = channel.index();
        self.iter()
            .map(|row| {
                let weight = if self.symmetric && !row.coord.is_diagonal() { 2 } else { 1 };
                weight * row.counts[idx]
            })
            .sum()
    }
}

/// Iterator over the stored blocks of a [`DensityMap`]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u64, ChannelCounts>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = BlockRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&key, &counts)| BlockRow {
            coord: BlockCoord::unpack(key),
            counts,
        })
    }
}
