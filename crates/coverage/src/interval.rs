//! Closed integer intervals and the flattening rules used to combine them.
//!
//! Two intervals combine when they overlap or when one ends on the integer
//! right before the other starts, so `[1, 3]` and `[4, 6]` flatten into
//! `[1, 6]` while `[1, 2]` and `[4, 5]` stay apart since `3` is not covered.

#[cfg(test)]
mod tests;

use core::fmt;
use core::slice;

use crate::error::Error;
use crate::Result;

/// A closed interval `[lo, hi]` where `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    lo: i64,
    hi: i64,
}

impl Interval {
    /// Construct a new interval, returns `None` if `lo > hi`.
    #[inline]
    pub const fn new(lo: i64, hi: i64) -> Option<Self> {
        if lo > hi {
            return None;
        }

        Some(Self { lo, hi })
    }

    /// An interval covering the single value `x`.
    #[inline]
    pub const fn point(x: i64) -> Self {
        Self { lo: x, hi: x }
    }

    /// The lowest value in the interval.
    #[inline]
    pub const fn lo(&self) -> i64 {
        self.lo
    }

    /// The highest value in the interval.
    #[inline]
    pub const fn hi(&self) -> i64 {
        self.hi
    }

    /// Number of integers in the interval, which is always at least one.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.hi - self.lo + 1
    }

    /// Test if `x` is inside of the interval.
    #[inline]
    pub const fn contains(&self, x: i64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Smallest interval covering both `self` and `other`.
    #[inline]
    fn union(self, other: Interval) -> Interval {
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }
}

impl fmt::Display for Interval {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Test if two intervals overlap, or touch on consecutive integers.
#[inline]
pub fn intersects_or_touches(a: Interval, b: Interval) -> bool {
    (a.lo <= b.hi && b.lo <= a.hi) || a.hi.abs_diff(b.lo) == 1 || b.hi.abs_diff(a.lo) == 1
}

/// Merge two intervals which overlap or touch.
pub fn merge(a: Interval, b: Interval) -> Result<Interval> {
    if !intersects_or_touches(a, b) {
        return Err(Error::PreconditionViolation(
            "merged intervals neither overlap nor touch",
        ));
    }

    Ok(a.union(b))
}

/// Flatten a collection of intervals into a sorted set of disjoint,
/// non-touching intervals covering the same integers.
pub fn flatten<I>(intervals: I) -> FlatIntervalSet
where
    I: IntoIterator<Item = Interval>,
{
    let mut flat = FlatIntervalSet::default();
    flat.rebuild(intervals);
    flat
}

/// Flatten the intervals in `buf`, leaving the flat representation behind in
/// the same buffer.
pub fn flatten_in_place(buf: &mut Vec<Interval>) {
    buf.sort_unstable_by_key(|i| i.lo);

    let mut len: usize = 0;

    for n in 0..buf.len() {
        let next = buf[n];

        match len.checked_sub(1).map(|last| (last, buf[last])) {
            Some((last, run)) if intersects_or_touches(run, next) => {
                buf[last] = run.union(next);
            }
            _ => {
                buf[len] = next;
                len += 1;
            }
        }
    }

    buf.truncate(len);
}

/// Intervals in `[lo, hi]` which are not covered by `flat`.
///
/// Errors unless `flat` is non-empty and lies entirely inside of `[lo, hi]`.
pub fn complement(flat: &FlatIntervalSet, lo: i64, hi: i64) -> Result<Vec<Interval>> {
    Ok(gaps(flat, lo, hi)?.collect())
}

/// Lazily computed gaps of `flat` inside of `[lo, hi]`, with the same
/// preconditions as [complement].
pub(crate) fn gaps(
    flat: &FlatIntervalSet,
    lo: i64,
    hi: i64,
) -> Result<impl Iterator<Item = Interval> + '_> {
    let (Some(first), Some(last)) = (flat.first(), flat.last()) else {
        return Err(Error::PreconditionViolation(
            "complement of an empty interval set",
        ));
    };

    if lo > first.lo || last.hi > hi {
        return Err(Error::PreconditionViolation(
            "interval set extends outside of complement bounds",
        ));
    }

    let leading = Interval::new(lo, first.lo - 1);
    let trailing = Interval::new(last.hi + 1, hi);

    let inner = flat
        .0
        .windows(2)
        .filter_map(|w| Interval::new(w[0].hi + 1, w[1].lo - 1));

    Ok(leading.into_iter().chain(inner).chain(trailing))
}

/// Restrict `interval` to `[lo, hi]`, returns `None` if nothing remains.
#[inline]
pub fn clamp(interval: Interval, lo: i64, hi: i64) -> Option<Interval> {
    Interval::new(interval.lo.max(lo), interval.hi.min(hi))
}

/// A sorted sequence of intervals which neither overlap nor touch.
///
/// Can only be constructed through [flatten] or [FlatIntervalSet::rebuild],
/// which guarantees the invariant.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlatIntervalSet(Vec<Interval>);

impl FlatIntervalSet {
    /// Replace the contents of the set with the flattened `intervals`,
    /// reusing the existing allocation.
    pub fn rebuild<I>(&mut self, intervals: I)
    where
        I: IntoIterator<Item = Interval>,
    {
        self.0.clear();
        self.0.extend(intervals);
        flatten_in_place(&mut self.0);
    }

    /// Access the intervals of the set.
    #[inline]
    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    /// Iterate over the intervals of the set in ascending order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Interval> {
        self.0.iter()
    }

    /// Number of intervals in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Test if the set covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The lowest interval.
    #[inline]
    pub fn first(&self) -> Option<&Interval> {
        self.0.first()
    }

    /// The highest interval.
    #[inline]
    pub fn last(&self) -> Option<&Interval> {
        self.0.last()
    }

    /// Total number of integers covered.
    pub fn width(&self) -> i64 {
        self.0.iter().map(Interval::width).sum()
    }

    /// Test if `x` is covered by any interval.
    pub fn contains(&self, x: i64) -> bool {
        let n = self.0.partition_point(|i| i.hi < x);
        self.0.get(n).map_or(false, |i| i.contains(x))
    }

    /// Convert into the underlying intervals.
    #[inline]
    pub fn into_vec(self) -> Vec<Interval> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FlatIntervalSet {
    type Item = &'a Interval;
    type IntoIter = slice::Iter<'a, Interval>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
