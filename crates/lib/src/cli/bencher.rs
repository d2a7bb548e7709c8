use core::fmt;
use core::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Error, Result};

use crate::cli::{Opts, Output, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default bench period in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

/// Runs a computation repeatedly and reports how long it took.
///
/// Every run must produce the same value as the first one, anything else
/// means the computation is not deterministic and the bench is aborted.
#[derive(Default)]
pub struct Bencher {
    samples: Vec<Duration>,
}

impl Bencher {
    /// Construct a new bencher.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bench the given fn, writing progress and the final report to `o`.
    pub fn iter<T, V, E>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        mut iter: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<V, E>,
        V: fmt::Debug + PartialEq,
        Error: From<E>,
    {
        let warmup = Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        let expected = iter()?;

        if !warmup.is_zero() {
            o.info(format_args!("warming up ({warmup:?})..."))?;

            let s = Instant::now();

            loop {
                let value = iter()?;
                check(&value, &expected)?;
                black_box(value);

                if s.elapsed() >= warmup {
                    break;
                }
            }
        }

        self.samples.clear();

        if let Some(count) = opts.count {
            let count = count.max(1);
            o.info(format_args!("running benches {count} time(s)..."))?;

            for _ in 0..count {
                self.sample(&mut iter, &expected)?;
            }
        } else {
            o.info(format_args!("running benches ({time_limit:?})..."))?;

            let start = Instant::now();

            loop {
                self.sample(&mut iter, &expected)?;

                if start.elapsed() >= time_limit {
                    break;
                }
            }
        }

        self.samples.sort();
        o.report(&Report::from_sorted(&self.samples))?;
        Ok(())
    }

    fn sample<T, V, E>(&mut self, iter: &mut T, expected: &V) -> Result<()>
    where
        T: FnMut() -> Result<V, E>,
        V: fmt::Debug + PartialEq,
        Error: From<E>,
    {
        let before = Instant::now();
        let value = iter()?;
        self.samples.push(before.elapsed());
        check(&value, expected)?;
        black_box(value);
        Ok(())
    }
}

fn check<V>(value: &V, expected: &V) -> Result<()>
where
    V: fmt::Debug + PartialEq,
{
    if value != expected {
        bail!("{value:?} (value) != {expected:?} (expected)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputKind;

    fn opts(args: &[&str]) -> Opts {
        Opts::parse_from(args.iter().map(Into::into)).unwrap()
    }

    #[test]
    fn test_bench_count() {
        let mut o = Output::new(Vec::new(), OutputKind::Normal);
        let mut calls = 0;

        Bencher::new()
            .iter(&mut o, &opts(&["--warmup", "0", "--count", "5"]), || {
                calls += 1;
                Ok::<_, Error>(42)
            })
            .unwrap();

        // One reference run followed by the counted runs.
        assert_eq!(calls, 6);

        let out = String::from_utf8(o.into_inner()).unwrap();
        assert!(out.contains("running benches 5 time(s)..."));
        assert!(out.contains("count: 5,"));
    }

    #[test]
    fn test_bench_nondeterministic() {
        let mut o = Output::new(Vec::new(), OutputKind::Normal);
        let mut n = 0;

        let result = Bencher::new().iter(&mut o, &opts(&["--warmup", "0", "--count", "2"]), || {
            n += 1;
            Ok::<_, Error>(n)
        });

        assert!(result.is_err());
    }
}
