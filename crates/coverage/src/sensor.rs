use crate::{Interval, Point};

/// A sensor covering every cell within its Manhattan radius.
///
/// The radius is the distance to the closest known object reported by the
/// sensor, called its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sensor {
    center: Point,
    boundary: Point,
    radius: i64,
}

impl Sensor {
    /// Construct a sensor at `center` whose closest known object is at
    /// `boundary`.
    #[inline]
    pub fn new(center: Point, boundary: Point) -> Self {
        Self {
            center,
            boundary,
            radius: center.manhattan(boundary),
        }
    }

    /// Position of the sensor.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The closest object reported by the sensor.
    #[inline]
    pub fn boundary(&self) -> Point {
        self.boundary
    }

    /// Manhattan radius covered by the sensor.
    #[inline]
    pub fn radius(&self) -> i64 {
        self.radius
    }

    /// The first and last row touched by the sensor's diamond.
    #[inline]
    pub fn vertical_span(&self) -> (i64, i64) {
        (self.center.y - self.radius, self.center.y + self.radius)
    }

    /// The x-coordinates covered on row `y`, if any.
    #[inline]
    pub fn covered_interval_at_row(&self, y: i64) -> Option<Interval> {
        let d = self
            .radius
            .checked_sub_unsigned(y.abs_diff(self.center.y))
            .filter(|d| *d >= 0)?;

        Interval::new(self.center.x - d, self.center.x + d)
    }

    /// Test if `point` is covered by the sensor.
    #[inline]
    pub fn covers(&self, point: Point) -> bool {
        self.center.manhattan(point) <= self.radius
    }
}
