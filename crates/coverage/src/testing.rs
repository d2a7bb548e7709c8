use crate::{ExcludedPointSet, Point, Sensor};

/// The example report, as `(sensor, closest beacon)` coordinates.
const EXAMPLE: [[i64; 4]; 14] = [
    [2, 18, -2, 15],
    [9, 16, 10, 16],
    [13, 2, 15, 3],
    [12, 14, 10, 16],
    [10, 20, 10, 16],
    [14, 17, 10, 16],
    [8, 7, 2, 10],
    [2, 0, 2, 10],
    [0, 11, 2, 10],
    [20, 14, 25, 17],
    [17, 20, 21, 22],
    [16, 7, 15, 3],
    [14, 3, 15, 3],
    [20, 1, 15, 3],
];

pub(crate) fn example() -> Vec<Sensor> {
    EXAMPLE
        .iter()
        .map(|&[sx, sy, bx, by]| Sensor::new(Point::new(sx, sy), Point::new(bx, by)))
        .collect()
}

pub(crate) fn example_excluded() -> ExcludedPointSet {
    example().iter().map(Sensor::boundary).collect()
}
