use std::path::PathBuf;

use lib::env::Size;

use super::*;

const REPORT: &str = include_str!("../inputs/example.txt");

fn readings() -> Vec<Reading> {
    parse(IStr::new(REPORT.as_bytes(), Size::ZERO)).unwrap()
}

fn query(rows: &[i64], target: Option<Target>, workers: usize) -> Query {
    Query {
        path: PathBuf::from("inputs/example.txt"),
        rows: rows.to_vec(),
        target,
        multiplier: query::DEFAULT_MULTIPLIER,
        workers,
    }
}

fn example() -> (Vec<Sensor>, ExcludedPointSet) {
    let readings = readings();
    let sensors = readings.iter().map(|r| Sensor::new(r.center, r.boundary)).collect();
    let excluded = readings.iter().map(|r| r.boundary).collect();
    (sensors, excluded)
}

#[test]
fn test_parse_report() {
    let readings = readings();

    assert_eq!(readings.len(), 14);

    assert_eq!(
        readings[0],
        Reading {
            center: Point::new(2, 18),
            boundary: Point::new(-2, 15),
        }
    );

    assert_eq!(
        readings[6],
        Reading {
            center: Point::new(8, 7),
            boundary: Point::new(2, 10),
        }
    );

    assert_eq!(Sensor::new(readings[6].center, readings[6].boundary).radius(), 9);
}

#[test]
fn test_parse_bad_report() {
    let input = IStr::new(b"Sensor at x=2, y=18: closest beacon is at x=-2\n", Size::ZERO);
    let error = parse(input).unwrap_err();
    assert!(matches!(error.kind(), lib::input::ErrorKind::BadArray(2, 1)));
}

#[test]
fn test_answers() {
    let (sensors, excluded) = example();
    let domain = BoundingDomain::square(0, 20).unwrap();

    let answers = answers(
        &query(&[10, 9], Some(Target::Domain(domain)), 1),
        &sensors,
        &excluded,
    )
    .unwrap();

    assert_eq!(
        answers,
        vec![
            Answer::Row { row: 10, count: 26 },
            Answer::Row { row: 9, count: 25 },
            Answer::Cell {
                point: Point::new(14, 11),
                signature: 56000011
            },
        ]
    );

    assert_eq!(answers[0].to_string(), "row 10: 26");
    assert_eq!(answers[2].to_string(), "cell 14,11: 56000011");
}

#[test]
fn test_answers_parallel() {
    let (sensors, excluded) = example();
    let domain = BoundingDomain::square(0, 20).unwrap();

    for workers in [2, 4, 21] {
        let answers = answers(
            &query(&[], Some(Target::Domain(domain)), workers),
            &sensors,
            &excluded,
        )
        .unwrap();

        assert_eq!(
            answers,
            vec![Answer::Cell {
                point: Point::new(14, 11),
                signature: 56000011
            }]
        );
    }
}

#[test]
fn test_answers_derived_domain() {
    let (sensors, excluded) = example();

    let answers = answers(&query(&[], Some(Target::Sensors), 1), &sensors, &excluded).unwrap();

    let [Answer::Cell { point, .. }] = answers.as_slice() else {
        panic!("expected a single cell: {answers:?}");
    };

    assert!(sensors.iter().all(|s| !s.covers(*point)));

    let error = super::answers(&query(&[], Some(Target::Sensors), 1), &[], &excluded).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<QueryError>(),
        Some(QueryError::NoSensors)
    ));
}

#[test]
fn test_answers_not_found() {
    let (sensors, excluded) = example();
    let domain = BoundingDomain::new(0, 0, 20, 10).unwrap();

    let error = answers(&query(&[], Some(Target::Domain(domain)), 1), &sensors, &excluded)
        .unwrap_err();

    assert_eq!(
        error.downcast_ref::<coverage::Error>(),
        Some(&coverage::Error::NotFound { domain })
    );
}

#[test]
fn test_answer_json() {
    let mut o = Output::new(Vec::new(), OutputKind::Json);

    o.answer(&Answer::Row { row: 10, count: 26 }).unwrap();
    o.answer(&Answer::Cell {
        point: Point::new(14, 11),
        signature: 56000011,
    })
    .unwrap();

    assert_eq!(
        String::from_utf8(o.into_inner()).unwrap(),
        concat!(
            "{\"type\":\"answer\",\"data\":{\"kind\":\"row\",\"row\":10,\"count\":26}}\n",
            "{\"type\":\"answer\",\"data\":{\"kind\":\"cell\",\"point\":{\"x\":14,\"y\":11},\"signature\":56000011}}\n",
        )
    );
}
