// Block density aggregation and output

pub mod aggregate;
pub mod block;
pub mod config;
pub mod grid;
pub mod summary;
pub mod writer;

pub use aggregate::aggregate;
pub use block::{BlockCoord, BlockRow, Channel, ChannelCounts, DensityMap, COMBINED, IMAG, REAL};
pub use config::{BoundsPolicy, DensityConfig, GridRounding};
pub use grid::DestinationGrid;
pub use summary::DensitySummary;
pub use writer::{write_density_map, write_density_map_to};
