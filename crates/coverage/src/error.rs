use thiserror::Error;

use crate::{BoundingDomain, Point};

/// Errors raised by the coverage engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// An interval operation was called with arguments outside of its
    /// contract. This is a bug in the composing code, not bad input.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
    /// Every row of the domain is fully covered.
    #[error("no uncovered cell in {domain}")]
    NotFound { domain: BoundingDomain },
    /// The signature of a point does not fit in 64 bits.
    #[error("signature of {point} with multiplier {multiplier} overflows")]
    Overflow { point: Point, multiplier: i64 },
}
