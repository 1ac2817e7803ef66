//! Density map writer
//!
//! Output layout:
//!
//! ```text
//! <real|complex> m n m_rate n_rate dst_n
//! dst_i dst_j count_real count_imag count_combined
//! ...
//! ```
//!
//! Rows are sorted by `(dst_i, dst_j)`; for symmetric storage the mirrored
//! off-diagonal blocks are included.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::density::block::{DensityMap, COMBINED, IMAG, REAL};
use crate::error::{Error, Result};

/// Write a density map to a file, creating or truncating it
///
/// Returns the number of block rows written. Failures carry the output path
/// as [`Error::Write`].
pub fn write_density_map<P: AsRef<Path>>(path: P, map: &DensityMap) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    let written = write_density_map_to(BufWriter::new(file), map).map_err(|e| match e {
        Error::Io(source) => Error::write(path, source),
        other => other,
    })?;
    debug!(path = %path.display(), rows = written, "wrote density map");
    Ok(written)
}

/// Write a density map to any writer, returning the number of block rows
pub fn write_density_map_to<W: Write>(mut out: W, map: &DensityMap) -> Result<usize> {
    let grid = map.grid();
    writeln!(
        out,
        "{} {} {} {} {} {}",
        map.domain(),
        grid.src_m,
        grid.src_n,
        grid.m_rate,
        grid.n_rate,
        grid.dst_n
    )?;

    let rows = map.rows();
    for row in &rows {
        writeln!(
            out,
            "{} {} {} {} {}",
            row.coord.row,
            row.coord.col,
            row.counts[REAL],
            row.counts[IMAG],
            row.counts[COMBINED]
        )?;
    }

    out.flush()?;
    Ok(rows.len())
}
