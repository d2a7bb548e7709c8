//! Answers coverage queries about a report of sensor readings.

mod query;
#[cfg(test)]
mod tests;

use core::fmt;
use std::io::{self, Write};

use coverage::{BoundingDomain, ExcludedPointSet, Point, Sensor};
use lib::cli::{Bencher, Mode, Opts, Output, OutputKind};
use lib::input::IStrError;
use lib::prelude::*;
use serde::Serialize;

use self::query::{Query, QueryError, Target};

type Coord = Split<'=', (Skip, i64)>;

/// A coordinate in the report, like `x=2, y=18`.
struct Position(Point);

lib::from_input! {
    |Split([Split((_, x)), Split((_, y))]): Split<',', [Coord; 2]>| -> Position {
        Ok(Position(Point::new(x, y)))
    }
}

/// A single line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reading {
    center: Point,
    boundary: Point,
}

lib::from_input! {
    |Split([Position(center), Position(boundary)]): Split<':', [Position; 2]>| -> Reading {
        Ok(Reading { center, boundary })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum Answer {
    /// Number of cells on a row which can't hold an undetected object.
    Row { row: i64, count: i64 },
    /// The uncovered cell found by a search.
    Cell { point: Point, signature: i64 },
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Row { row, count } => write!(f, "row {row}: {count}"),
            Answer::Cell { point, signature } => write!(f, "cell {point}: {signature}"),
        }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;
    let mut o = Output::new(io::stdout(), opts.output_kind());

    if let Err(error) = run(&opts, &mut o) {
        if opts.output_kind() == OutputKind::Json {
            o.error(format_args!("{error:#}"))?;
            std::process::exit(1);
        }

        return Err(error);
    }

    Ok(())
}

fn run<O>(opts: &Opts, o: &mut Output<O>) -> Result<()>
where
    O: Write,
{
    let query = Query::parse(opts.args.iter().cloned())?;
    let input = lib::env::input(&query.path)?;

    let readings = match parse(input) {
        Ok(readings) => readings,
        Err(error) => return Err(lib::cli::error_context(&query.path, input, error)),
    };

    let sensors = readings
        .iter()
        .map(|r| Sensor::new(r.center, r.boundary))
        .collect::<Vec<_>>();

    let excluded = readings
        .iter()
        .map(|r| r.boundary)
        .collect::<ExcludedPointSet>();

    log::debug!(
        "{}: {} sensors, {} known beacons",
        query.path.display(),
        sensors.len(),
        excluded.len()
    );

    match opts.mode {
        Mode::Default => {
            for answer in answers(&query, &sensors, &excluded)? {
                o.answer(&answer)?;
            }
        }
        Mode::Bench => {
            Bencher::new().iter(o, opts, || answers(&query, &sensors, &excluded))?;
        }
    }

    Ok(())
}

/// Parse every non-blank line of the report.
fn parse(mut input: IStr) -> Result<Vec<Reading>, IStrError> {
    let mut readings = Vec::new();

    while let Some(reading) = input.try_line::<Reading>()? {
        readings.push(reading);
    }

    Ok(readings)
}

/// Answer every query, rows first in the order given followed by the search.
fn answers(query: &Query, sensors: &[Sensor], excluded: &ExcludedPointSet) -> Result<Vec<Answer>> {
    let mut answers = Vec::with_capacity(query.rows.len() + 1);

    for &row in &query.rows {
        let count = coverage::count_excluded_cells(sensors, excluded, row);
        answers.push(Answer::Row { row, count });
    }

    if let Some(target) = query.target {
        let domain = match target {
            Target::Domain(domain) => domain,
            Target::Sensors => {
                BoundingDomain::from_sensors(sensors).ok_or(QueryError::NoSensors)?
            }
        };

        let point = if query.workers > 1 {
            coverage::find_uncovered_cell_parallel(sensors, domain, query.workers)?
        } else {
            coverage::find_uncovered_cell(sensors, domain)?
        };

        let signature = coverage::signature(point, query.multiplier)?;
        answers.push(Answer::Cell { point, signature });
    }

    Ok(answers)
}
