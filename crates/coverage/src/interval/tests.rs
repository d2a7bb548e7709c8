use std::collections::BTreeSet;

use super::*;

fn iv(lo: i64, hi: i64) -> Interval {
    Interval::new(lo, hi).expect("valid interval")
}

fn flat(intervals: &[(i64, i64)]) -> Vec<Interval> {
    flatten(intervals.iter().map(|&(lo, hi)| iv(lo, hi))).into_vec()
}

/// Small xorshift generator so that the randomized tests are reproducible.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next() % (hi - lo + 1) as u64) as i64
    }

    fn intervals(&mut self, count: usize) -> Vec<Interval> {
        (0..count)
            .map(|_| {
                let lo = self.range(-20, 20);
                iv(lo, lo + self.range(0, 6))
            })
            .collect()
    }

    fn shuffle<T>(&mut self, values: &mut [T]) {
        for n in (1..values.len()).rev() {
            let m = (self.next() % (n as u64 + 1)) as usize;
            values.swap(n, m);
        }
    }
}

fn cells<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> BTreeSet<i64> {
    intervals
        .into_iter()
        .flat_map(|i| i.lo()..=i.hi())
        .collect()
}

#[test]
fn test_new_rejects_inverted() {
    assert_eq!(Interval::new(3, 2), None);
    assert_eq!(Interval::new(2, 2), Some(Interval::point(2)));
    assert_eq!(iv(-3, 3).width(), 7);
}

#[test]
fn test_intersects_or_touches() {
    assert!(intersects_or_touches(iv(1, 3), iv(3, 6)));
    assert!(intersects_or_touches(iv(1, 3), iv(2, 4)));
    assert!(!intersects_or_touches(iv(1, 3), iv(5, 7)));
    assert!(intersects_or_touches(iv(1, 2), iv(3, 4)));
    assert!(intersects_or_touches(iv(3, 4), iv(1, 2)));
    assert!(intersects_or_touches(iv(1, 10), iv(4, 5)));
    assert!(!intersects_or_touches(iv(1, 2), iv(4, 5)));
    assert!(!intersects_or_touches(iv(4, 5), iv(1, 2)));
}

#[test]
fn test_merge() {
    assert_eq!(merge(iv(1, 3), iv(2, 4)), Ok(iv(1, 4)));
    assert_eq!(merge(iv(4, 6), iv(1, 3)), Ok(iv(1, 6)));
    assert!(matches!(
        merge(iv(1, 2), iv(4, 5)),
        Err(Error::PreconditionViolation(..))
    ));
}

#[test]
fn test_flatten() {
    assert_eq!(flat(&[]), vec![]);
    assert_eq!(
        flat(&[(1, 3), (2, 5), (7, 9), (9, 10)]),
        vec![iv(1, 5), iv(7, 10)]
    );
    assert_eq!(flat(&[(1, 2), (3, 4), (5, 6), (7, 8)]), vec![iv(1, 8)]);
    assert_eq!(
        flat(&[(1, 2), (4, 5), (7, 8)]),
        vec![iv(1, 2), iv(4, 5), iv(7, 8)]
    );
}

#[test]
fn test_flatten_touching() {
    assert_eq!(flat(&[(1, 3), (4, 6)]), vec![iv(1, 6)]);
    assert_eq!(flat(&[(4, 6), (1, 3)]), vec![iv(1, 6)]);
    assert_eq!(flat(&[(1, 2), (4, 5)]), vec![iv(1, 2), iv(4, 5)]);
}

#[test]
fn test_flatten_nested() {
    assert_eq!(flat(&[(0, 20), (3, 4), (5, 5), (19, 22)]), vec![iv(0, 22)]);
    assert_eq!(flat(&[(5, 5), (5, 5), (5, 5)]), vec![iv(5, 5)]);
}

#[test]
fn test_flatten_idempotent() {
    let mut rng = Rng(0x2545f4914f6cdd1d);

    for count in 0..40 {
        let once = flatten(rng.intervals(count));
        let twice = flatten(once.iter().copied());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_flatten_permutation_invariant() {
    let mut rng = Rng(0x9e3779b97f4a7c15);

    for count in 1..40 {
        let mut intervals = rng.intervals(count);
        let expected = flatten(intervals.iter().copied());

        for _ in 0..8 {
            rng.shuffle(&mut intervals);
            assert_eq!(flatten(intervals.iter().copied()), expected);
        }

        intervals.reverse();
        assert_eq!(flatten(intervals.iter().copied()), expected);
    }
}

#[test]
fn test_flatten_matches_cells() {
    let mut rng = Rng(0xdeadbeefcafebabe);

    for count in 0..60 {
        let intervals = rng.intervals(count);
        let flat = flatten(intervals.iter().copied());

        assert_eq!(cells(&flat), cells(&intervals));
        assert_eq!(flat.width(), cells(&intervals).len() as i64);

        for w in flat.as_slice().windows(2) {
            assert!(w[0].hi() + 1 < w[1].lo(), "{} and {} touch", w[0], w[1]);
        }
    }
}

#[test]
fn test_flatten_in_place_reuses_buffer() {
    let mut buf = vec![iv(7, 9), iv(1, 3), iv(4, 4), iv(11, 12)];
    flatten_in_place(&mut buf);
    assert_eq!(buf, vec![iv(1, 4), iv(7, 9), iv(11, 12)]);

    let mut set = flatten([iv(1, 1)]);
    set.rebuild([iv(3, 5), iv(0, 1)]);
    assert_eq!(set.as_slice(), &[iv(0, 1), iv(3, 5)]);
}

#[test]
fn test_complement() {
    let c = |intervals: &[(i64, i64)], lo, hi| {
        let set = flatten(intervals.iter().map(|&(lo, hi)| iv(lo, hi)));
        complement(&set, lo, hi)
    };

    assert_eq!(c(&[(0, 10)], 0, 10), Ok(vec![]));
    assert_eq!(c(&[(2, 8)], 0, 10), Ok(vec![iv(0, 1), iv(9, 10)]));
    assert_eq!(
        c(&[(1, 5), (7, 9)], 0, 10),
        Ok(vec![iv(0, 0), iv(6, 6), iv(10, 10)])
    );
    assert_eq!(c(&[(1, 1)], 0, 10), Ok(vec![iv(0, 0), iv(2, 10)]));
}

#[test]
fn test_complement_preconditions() {
    assert!(matches!(
        complement(&FlatIntervalSet::default(), 0, 10),
        Err(Error::PreconditionViolation(..))
    ));

    let set = flatten([iv(-1, 4)]);
    assert!(complement(&set, 0, 10).is_err());

    let set = flatten([iv(2, 11)]);
    assert!(complement(&set, 0, 10).is_err());
}

#[test]
fn test_complement_round_trip() {
    let mut rng = Rng(0x0123456789abcdef);

    for count in 1..40 {
        let set = flatten(rng.intervals(count));
        let first = set.first().copied().expect("non-empty set");
        let last = set.last().copied().expect("non-empty set");
        let lo = first.lo() - rng.range(0, 3);
        let hi = last.hi() + rng.range(0, 3);

        let gaps = complement(&set, lo, hi).expect("set inside bounds");

        for gap in &gaps {
            assert!(set.iter().all(|i| !(i.lo() <= gap.hi() && gap.lo() <= i.hi())));
        }

        let whole = flatten(set.iter().copied().chain(gaps));
        assert_eq!(whole.as_slice(), &[iv(lo, hi)]);
    }
}

#[test]
fn test_clamp() {
    assert_eq!(clamp(iv(1, 3), 0, 4), Some(iv(1, 3)));
    assert_eq!(clamp(iv(1, 3), 1, 3), Some(iv(1, 3)));
    assert_eq!(clamp(iv(1, 3), 2, 2), Some(iv(2, 2)));
    assert_eq!(clamp(iv(2, 2), 2, 2), Some(iv(2, 2)));
    assert_eq!(clamp(iv(1, 3), 4, 5), None);
    assert_eq!(clamp(iv(-10, 30), 0, 20), Some(iv(0, 20)));
}

#[test]
fn test_contains() {
    let set = flatten([iv(1, 3), iv(7, 9), iv(12, 12)]);

    for x in [1, 2, 3, 7, 8, 9, 12] {
        assert!(set.contains(x), "{x} should be covered");
    }

    for x in [-5, 0, 4, 5, 6, 10, 11, 13] {
        assert!(!set.contains(x), "{x} should not be covered");
    }
}
