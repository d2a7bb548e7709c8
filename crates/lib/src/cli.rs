//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod stdout_logger;

use core::fmt;
use core::time::Duration;
use std::ffi::OsString;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

pub use self::bencher::Bencher;
pub use self::error::{error_context, LineCol};
pub use self::output::{Output, OutputKind};

static STDOUT_LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

/// Run mode.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Common CLI options.
///
/// Arguments which are not recognized are collected in order, so that the
/// program can interpret them as its own options.
#[derive(Debug, Default)]
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON lines.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
    /// Arguments not handled here.
    pub args: Vec<String>,
}

impl Opts {
    /// Parse CLI options from the environment and install the logger.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1))?;

        if !opts.json {
            log::set_max_level(if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });

            log::set_logger(&STDOUT_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse CLI options from the given arguments.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--json" => {
                    opts.json = true;
                }
                "--warmup" => {
                    opts.warmup = Some(value(&mut it, "--warmup")?);
                }
                "--time-limit" => {
                    opts.time_limit = Some(value(&mut it, "--time-limit")?);
                }
                "--count" => {
                    opts.count = Some(value(&mut it, "--count")?);
                }
                "--" => {
                    break;
                }
                other => {
                    opts.args.push(other.to_owned());
                }
            }
        }

        for arg in it {
            let arg = arg
                .into_string()
                .map_err(|_| anyhow!("non-utf8 argument"))?;
            opts.args.push(arg);
        }

        Ok(opts)
    }

    /// Test if options are verbose.
    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The kind of output requested.
    #[inline]
    pub fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Parse the argument following `flag`.
fn value<T>(it: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<T>
where
    T: core::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = it
        .next()
        .with_context(|| anyhow!("missing argument to `{flag}`"))?;
    let value = value
        .to_str()
        .with_context(|| anyhow!("missing string argument to `{flag}`"))?;
    value
        .parse()
        .with_context(|| anyhow!("bad argument to `{flag}`"))
}

/// Timings collected in bench mode.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
}

impl Report {
    /// Build a report out of sorted samples.
    fn from_sorted(samples: &[Duration]) -> Self {
        let count = samples.len();

        let percentile = |p: usize| {
            count
                .checked_sub(1)
                .and_then(|last| samples.get(last * p / 100))
                .copied()
                .unwrap_or_default()
        };

        let sum = samples.iter().sum::<Duration>();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(
                u64::try_from(sum.as_nanos() / count as u128).unwrap_or_default(),
            )
        };

        Self {
            p50: percentile(50),
            p95: percentile(95),
            p99: percentile(99),
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            p50,
            p95,
            p99,
            count,
            min,
            max,
            avg,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}
