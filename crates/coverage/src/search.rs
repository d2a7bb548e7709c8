//! Searching a bounded domain for the cell which escapes every sensor.


use core::ops::RangeInclusive;
use std::sync::atomic::{AtomicI64, Ordering};

use rayon::prelude::*;

use crate::engine::{first_gap_with, gap_start};
use crate::{BoundingDomain, Error, FlatIntervalSet, Point, Result, Sensor};

/// Find the uncovered cell with the lowest row inside of `domain`.
///
/// Errors with [Error::NotFound] if every cell of the domain is covered.
pub fn find_uncovered_cell(sensors: &[Sensor], domain: BoundingDomain) -> Result<Point> {
    log::debug!("searching {domain} with {} sensors", sensors.len());

    let mut flat = FlatIntervalSet::default();

    match scan(&mut flat, sensors, &domain, domain.rows(), None)? {
        Some(point) => Ok(point),
        None => Err(Error::NotFound { domain }),
    }
}

/// Find the uncovered cell with the lowest row inside of `domain`, splitting
/// the rows into `workers` contiguous bands which are scanned in parallel.
///
/// Produces the same result as [find_uncovered_cell].
pub fn find_uncovered_cell_parallel(
    sensors: &[Sensor],
    domain: BoundingDomain,
    workers: usize,
) -> Result<Point> {
    let height = domain.height();
    let workers = u64::try_from(workers).unwrap_or(u64::MAX).clamp(1, height);
    let band = height / workers + u64::from(height % workers != 0);

    log::debug!(
        "searching {domain} with {} sensors using {workers} workers ({band} rows each)",
        sensors.len()
    );

    // Lowest row a gap has been found on so far, bands past it stop early.
    let found = AtomicI64::new(i64::MAX);

    let results = (0..workers)
        .into_par_iter()
        .map(|n| {
            let start = n
                .checked_mul(band)
                .and_then(|offset| domain.y_min.checked_add_unsigned(offset));

            let Some(start) = start else {
                return Ok(None);
            };

            let end = start.saturating_add_unsigned(band - 1).min(domain.y_max);

            if start > end {
                return Ok(None);
            }

            log::debug!("worker {n}: rows {start}..={end}");

            let mut flat = FlatIntervalSet::default();
            let point = scan(&mut flat, sensors, &domain, start..=end, Some(&found))?;

            if let Some(point) = point {
                found.fetch_min(point.y, Ordering::Relaxed);
            }

            Ok(point)
        })
        .collect::<Result<Vec<_>>>()?;

    match results.into_iter().flatten().min_by_key(|p| p.y) {
        Some(point) => Ok(point),
        None => Err(Error::NotFound { domain }),
    }
}

/// The scalar signature of `point`, calculated as `x * multiplier + y`.
pub fn signature(point: Point, multiplier: i64) -> Result<i64> {
    point
        .x
        .checked_mul(multiplier)
        .and_then(|x| x.checked_add(point.y))
        .ok_or(Error::Overflow { point, multiplier })
}

/// Scan `rows` in order, returning the first uncovered cell.
///
/// If `found` is provided, scanning stops once it passes the lowest row which
/// is known to contain a gap.
fn scan(
    flat: &mut FlatIntervalSet,
    sensors: &[Sensor],
    domain: &BoundingDomain,
    rows: RangeInclusive<i64>,
    found: Option<&AtomicI64>,
) -> Result<Option<Point>> {
    for y in rows {
        if let Some(found) = found {
            if found.load(Ordering::Relaxed) < y {
                log::trace!("row {y}: gap already found on a lower row");
                return Ok(None);
            }
        }

        if let Some(gap) = first_gap_with(flat, sensors, y, domain.x_min, domain.x_max)? {
            let x = gap_start(y, gap);
            log::debug!("row {y}: uncovered cell at x = {x}");
            return Ok(Some(Point::new(x, y)));
        }
    }

    Ok(None)
}
