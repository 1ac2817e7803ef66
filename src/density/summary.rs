//! Reading density maps back for plotting and analysis
//!
//! A [`DensitySummary`] is the parsed form of a file produced by the writer.
//! It turns block counts into per-block densities, the quantity a heat map
//! front end actually plots.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::density::block::{BlockCoord, BlockRow, Channel};
use crate::density::config::GridRounding;
use crate::density::grid::DestinationGrid;
use crate::error::{Error, Result};
use crate::matrix::banner::ValueDomain;

/// Parsed density map file
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySummary {
    pub domain: ValueDomain,
    /// Source rows
    pub m: u32,
    /// Source columns
    pub n: u32,
    pub m_rate: u32,
    pub n_rate: u32,
    pub dst_n: u32,
    /// Destination block rows, inferred from the header and widened to cover
    /// every listed block
    pub dst_m: u32,
    /// Block rows as listed in the file (mirrors included)
    pub rows: Vec<BlockRow>,
}

impl DensitySummary {
    /// Read a density map file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse a density map from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::parse(1, "missing density map header")),
        };
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(Error::parse(
                1,
                format!("expected 6 header fields, got {}", parts.len()),
            ));
        }
        let domain: ValueDomain = parts[0]
            .parse()
            .map_err(|_| Error::parse(1, format!("unknown value domain '{}'", parts[0])))?;
        let number = |idx: usize| {
            parts[idx]
                .parse::<u32>()
                .map_err(|_| Error::parse(1, format!("invalid header field '{}'", parts[idx])))
        };
        let (m, n) = (number(1)?, number(2)?);
        let (m_rate, n_rate, dst_n) = (number(3)?, number(4)?, number(5)?);
        if m_rate == 0 || n_rate == 0 {
            return Err(Error::parse(1, "scaling rates must be positive"));
        }

        let mut rows = Vec::new();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + 2;
            if line.trim().is_empty() {
                continue;
            }
            let fields = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<u64>()
                        .map_err(|_| Error::parse(line_no, format!("invalid field '{}'", tok)))
                })
                .collect::<Result<Vec<u64>>>()?;
            if fields.len() != 5 {
                return Err(Error::parse(
                    line_no,
                    format!("expected 5 fields, got {}", fields.len()),
                ));
            }
            let coord = |v: u64| {
                u32::try_from(v)
                    .map_err(|_| Error::parse(line_no, format!("block index {} too large", v)))
            };
            let (row, col) = (coord(fields[0])?, coord(fields[1])?);
            if col >= dst_n {
                return Err(Error::parse(
                    line_no,
                    format!("block column {} outside 0..{}", col, dst_n),
                ));
            }
            rows.push(BlockRow {
                coord: BlockCoord::new(row, col),
                counts: [fields[2], fields[3], fields[4]],
            });
        }

        let from_rows = rows.iter().map(|r| r.coord.row + 1).max().unwrap_or(0);
        let dst_m = infer_dst_m(m, n, m_rate, n_rate, dst_n).max(from_rows);

        Ok(Self {
            domain,
            m,
            n,
            m_rate,
            n_rate,
            dst_n,
            dst_m,
            rows,
        })
    }

    /// Sum of one channel over all listed blocks
    pub fn total(&self, channel: Channel) -> u64 {
        let idx = channel.index();
        self.rows.iter().map(|r| r.counts[idx]).sum()
    }

    /// Dense `dst_m × dst_n` grid of per-block densities for one channel
    ///
    /// Each cell holds `count / (m_rate * n_rate)`, the fraction of source
    /// cells in the block that are nonzero.
    pub fn to_density_grid(&self, channel: Channel) -> Array2<f64> {
        let idx = channel.index();
        let from_rows = self.rows.iter().map(|r| r.coord.row + 1).max().unwrap_or(0);
        let dst_m = self.dst_m.max(from_rows) as usize;
        let mut grid = Array2::<f64>::zeros((dst_m, self.dst_n as usize));
        let area = self.m_rate as f64 * self.n_rate as f64;
        for row in &self.rows {
            let cell = [row.coord.row as usize, row.coord.col as usize];
            grid[cell] = row.counts[idx] as f64 / area;
        }
        grid
    }

    /// Density of the whole source matrix for one channel
    pub fn overall_density(&self, channel: Channel) -> f64 {
        let cells = self.m as f64 * self.n as f64;
        if cells == 0.0 {
            return 0.0;
        }
        self.total(channel) as f64 / cells
    }

    /// Nonzero count of the logical matrix
    pub fn nnz(&self) -> u64 {
        self.total(Channel::Combined)
    }
}

/// Recovers the destination row count that produced a header
///
/// The header carries `dst_n` and both rates but not `dst_m`. Each rounding
/// mode bounds `dst_m` from below through `m_rate` and `dst_n`; the smallest
/// candidate that reproduces the header is taken, floor first. Several row
/// counts can share one header, so callers widen the result to the listed
/// blocks. Headers no grid reproduces fall back to `ceil(m / m_rate)`.
fn infer_dst_m(m: u32, n: u32, m_rate: u32, n_rate: u32, dst_n: u32) -> u32 {
    let (m64, n64) = (m as u64, n as u64);
    let (rate, cols) = (m_rate as u64, dst_n as u64);

    // floor: m_rate = m / dst_m, dst_n = max(1, dst_m * n / m)
    let mut floor_lo = m64 / (rate + 1) + 1;
    if cols > 1 && n64 > 0 {
        floor_lo = floor_lo.max((cols * m64 + n64 - 1) / n64);
    }
    // ceil: m_rate = ceil(m / dst_m), dst_n = max(1, ceil(dst_m * n / m))
    let from_rate = (m64 + rate - 1) / rate;
    let mut ceil_lo = from_rate;
    if cols > 1 && n64 > 0 {
        ceil_lo = ceil_lo.max((cols - 1) * m64 / n64 + 1);
    }

    let reproduces = |lo: u64, rounding: GridRounding| -> Option<u32> {
        let dst_m = u32::try_from(lo).ok()?;
        let grid = DestinationGrid::new(m, n, dst_m, rounding).ok()?;
        let matches = grid.m_rate == m_rate && grid.n_rate == n_rate && grid.dst_n == dst_n;
        matches.then_some(dst_m)
    };

    reproduces(floor_lo, GridRounding::Floor)
        .or_else(|| reproduces(ceil_lo, GridRounding::Ceil))
        .unwrap_or(from_rate.clamp(1, m64.max(1)) as u32)
}
