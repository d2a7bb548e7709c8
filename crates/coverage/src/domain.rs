use core::fmt;
use core::num::ParseIntError;
use core::ops::RangeInclusive;
use core::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::Sensor;

/// An inclusive rectangle of cells to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingDomain {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BoundingDomain {
    /// Construct a new domain, returns `None` if either axis is inverted.
    pub const fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Option<Self> {
        if x_min > x_max || y_min > y_max {
            return None;
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// A square domain spanning `lo..=hi` on both axes.
    pub const fn square(lo: i64, hi: i64) -> Option<Self> {
        Self::new(lo, lo, hi, hi)
    }

    /// The smallest domain containing the diamonds of all sensors, returns
    /// `None` if there are no sensors.
    pub fn from_sensors(sensors: &[Sensor]) -> Option<Self> {
        let (first, rest) = sensors.split_first()?;

        let init = Self::around(first);

        Some(rest.iter().fold(init, |d, s| {
            let s = Self::around(s);

            Self {
                x_min: d.x_min.min(s.x_min),
                y_min: d.y_min.min(s.y_min),
                x_max: d.x_max.max(s.x_max),
                y_max: d.y_max.max(s.y_max),
            }
        }))
    }

    /// Rows covered by the domain.
    #[inline]
    pub fn rows(&self) -> RangeInclusive<i64> {
        self.y_min..=self.y_max
    }

    /// Number of rows in the domain, saturating at [u64::MAX].
    #[inline]
    pub fn height(&self) -> u64 {
        self.y_max.abs_diff(self.y_min).saturating_add(1)
    }

    fn around(s: &Sensor) -> Self {
        let c = s.center();
        let r = s.radius();

        Self {
            x_min: c.x - r,
            y_min: c.y - r,
            x_max: c.x + r,
            y_max: c.y + r,
        }
    }
}

impl fmt::Display for BoundingDomain {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}..={},{}",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Error raised when parsing a [BoundingDomain] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDomainError {
    #[error("expected four comma-separated integers `x_min,y_min,x_max,y_max`")]
    Arity,
    #[error("bad coordinate: {0}")]
    Coordinate(#[from] ParseIntError),
    #[error("domain is inverted")]
    Inverted,
}

impl FromStr for BoundingDomain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.split(',').map(|part| part.trim().parse::<i64>());

        let (Some(x_min), Some(y_min), Some(x_max), Some(y_max), None) =
            (it.next(), it.next(), it.next(), it.next(), it.next())
        else {
            return Err(ParseDomainError::Arity);
        };

        Self::new(x_min?, y_min?, x_max?, y_max?).ok_or(ParseDomainError::Inverted)
    }
}
