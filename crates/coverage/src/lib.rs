//! Coverage analysis for sensors on an integer grid under the Manhattan
//! metric.
//!
//! Every sensor covers a diamond, which projects onto any row as a closed
//! interval of x-coordinates. Rows are answered by flattening those
//! intervals, which keeps the cost of a row proportional to the number of
//! sensors rather than to the width of the grid.

mod domain;
mod engine;
mod error;
mod excluded;
pub mod interval;
mod point;
mod search;
mod sensor;

#[cfg(test)]
mod testing;

pub use self::domain::{BoundingDomain, ParseDomainError};
pub use self::engine::{count_excluded_cells, find_gap_at_row, first_gap_at_row, row_coverage};
pub use self::error::Error;
pub use self::excluded::ExcludedPointSet;
pub use self::interval::{FlatIntervalSet, Interval};
pub use self::point::Point;
pub use self::search::{find_uncovered_cell, find_uncovered_cell_parallel, signature};
pub use self::sensor::Sensor;

/// Result alias used throughout the engine.
pub type Result<T, E = Error> = core::result::Result<T, E>;
