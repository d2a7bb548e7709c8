use std::collections::HashSet;

use crate::{FlatIntervalSet, Point};

/// Points which are known not to hold an undetected object.
///
/// Duplicates collapse, so a point is only ever subtracted once from a row
/// count.
#[derive(Debug, Default, Clone)]
pub struct ExcludedPointSet {
    points: HashSet<Point>,
}

impl ExcludedPointSet {
    /// Construct an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point)
    }

    /// Test if the set contains `point`.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    /// Number of distinct points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Test if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Count the points on row `y` which are covered by `covered`.
    pub fn count_on_row(&self, y: i64, covered: &FlatIntervalSet) -> usize {
        self.points
            .iter()
            .filter(|p| p.y == y && covered.contains(p.x))
            .count()
    }
}

impl FromIterator<Point> for ExcludedPointSet {
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for ExcludedPointSet {
    #[inline]
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.points.extend(iter);
    }
}
