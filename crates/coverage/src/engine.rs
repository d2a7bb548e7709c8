//! Row queries over a collection of sensors.


use crate::interval::{self, FlatIntervalSet, Interval};
use crate::{ExcludedPointSet, Result, Sensor};

/// All x-coordinates covered by any sensor on row `y`.
pub fn row_coverage(sensors: &[Sensor], y: i64) -> FlatIntervalSet {
    interval::flatten(sensors.iter().filter_map(|s| s.covered_interval_at_row(y)))
}

/// Count the cells on row `y` which cannot hold an undetected object.
///
/// That is every covered cell, except those already known to hold an object.
pub fn count_excluded_cells(sensors: &[Sensor], excluded: &ExcludedPointSet, y: i64) -> i64 {
    let covered = row_coverage(sensors, y);
    let known = excluded.count_on_row(y, &covered);
    covered.width() - known as i64
}

/// Find the first x-coordinate in `x_lo..=x_hi` on row `y` which is not
/// covered by any sensor.
///
/// Gaps wider than a single cell are accepted, in which case the lowest
/// coordinate of the gap is returned.
pub fn find_gap_at_row(sensors: &[Sensor], y: i64, x_lo: i64, x_hi: i64) -> Result<Option<i64>> {
    let mut flat = FlatIntervalSet::default();
    let gap = first_gap_with(&mut flat, sensors, y, x_lo, x_hi)?;
    Ok(gap.map(|gap| gap_start(y, gap)))
}

/// Find the first interval in `x_lo..=x_hi` on row `y` which is not covered
/// by any sensor.
pub fn first_gap_at_row(
    sensors: &[Sensor],
    y: i64,
    x_lo: i64,
    x_hi: i64,
) -> Result<Option<Interval>> {
    let mut flat = FlatIntervalSet::default();
    first_gap_with(&mut flat, sensors, y, x_lo, x_hi)
}

/// Find the first gap using `flat` as scratch space.
pub(crate) fn first_gap_with(
    flat: &mut FlatIntervalSet,
    sensors: &[Sensor],
    y: i64,
    x_lo: i64,
    x_hi: i64,
) -> Result<Option<Interval>> {
    flat.rebuild(
        sensors
            .iter()
            .filter_map(|s| s.covered_interval_at_row(y))
            .filter_map(|i| interval::clamp(i, x_lo, x_hi)),
    );

    // Nothing covered, so the whole range is a gap.
    if flat.is_empty() {
        return Ok(Interval::new(x_lo, x_hi));
    }

    Ok(interval::gaps(flat, x_lo, x_hi)?.next())
}

/// Reduce a gap to its first coordinate.
pub(crate) fn gap_start(y: i64, gap: Interval) -> i64 {
    if gap.width() > 1 {
        log::warn!("row {y}: gap {gap} is {} cells wide", gap.width());
    }

    gap.lo()
}
