//! Queries requested on the command line.


use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use coverage::BoundingDomain;
use thiserror::Error;

/// Multiplier used for signatures unless `--multiplier` is given.
pub(crate) const DEFAULT_MULTIPLIER: i64 = 4_000_000;

#[derive(Debug, Error)]
pub(crate) enum QueryError {
    #[error("missing path to sensor report")]
    MissingPath,
    #[error("nothing to do, expected at least one of `--row`, `--domain` or `--search`")]
    MissingQuery,
    #[error("`--domain` and `--search` can't be used together")]
    ConflictingSearch,
    #[error("no sensors to derive a search domain from")]
    NoSensors,
}

/// Where to look for the uncovered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// An explicit rectangle.
    Domain(BoundingDomain),
    /// The rectangle spanned by the diamonds of every sensor.
    Sensors,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Query {
    pub(crate) path: PathBuf,
    pub(crate) rows: Vec<i64>,
    pub(crate) target: Option<Target>,
    pub(crate) multiplier: i64,
    pub(crate) workers: usize,
}

impl Query {
    /// Parse a query out of the arguments which were not consumed by
    /// [lib::cli::Opts].
    pub(crate) fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut rows: Vec<i64> = Vec::new();
        let mut target = None;
        let mut multiplier = DEFAULT_MULTIPLIER;
        let mut workers: usize = 1;

        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--row" => {
                    rows.push(value(&mut it, "--row")?);
                }
                "--domain" => {
                    let domain = value(&mut it, "--domain")?;
                    set_target(&mut target, Target::Domain(domain))?;
                }
                "--search" => {
                    set_target(&mut target, Target::Sensors)?;
                }
                "--multiplier" => {
                    multiplier = value(&mut it, "--multiplier")?;
                }
                "--workers" => {
                    workers = value(&mut it, "--workers")?;
                }
                flag if flag.starts_with("--") => {
                    bail!("unsupported argument `{flag}`");
                }
                _ => {
                    if path.is_some() {
                        bail!("unexpected argument `{arg}`");
                    }

                    path = Some(PathBuf::from(&arg));
                }
            }
        }

        let path = path.ok_or(QueryError::MissingPath)?;

        if rows.is_empty() && target.is_none() {
            return Err(QueryError::MissingQuery.into());
        }

        Ok(Self {
            path,
            rows,
            target,
            multiplier,
            workers: workers.max(1),
        })
    }
}

fn set_target(target: &mut Option<Target>, new: Target) -> Result<()> {
    if target.replace(new).is_some() {
        return Err(QueryError::ConflictingSearch.into());
    }

    Ok(())
}

/// Parse the argument following `flag`.
fn value<T>(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: core::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = it
        .next()
        .with_context(|| anyhow!("missing argument to `{flag}`"))?;

    value
        .parse()
        .with_context(|| anyhow!("bad argument `{value}` to `{flag}`"))
}
