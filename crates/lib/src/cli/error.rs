use core::fmt;
use core::ops::Range;
use std::path::{Path, PathBuf};

use bstr::BStr;

use crate::env::Size;
use crate::input::{IStr, IStrError, NL};

/// Associate the position in `input` which caused `error` with it.
pub fn error_context<E>(path: &Path, input: IStr, error: E) -> anyhow::Error
where
    anyhow::Error: From<E>,
{
    let error = anyhow::Error::from(error);
    let data = input.as_data();
    let span = find_range(&error);
    let pos = crate::env::pos_from(data, span.clone());
    let line = line_at(data, span.start);

    error.context(ErrorContext {
        path: path.to_owned(),
        pos,
        line,
    })
}

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
    end: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0, 0);

    pub(crate) const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;
        let start = self.start + 1;

        if self.end > self.start + 1 {
            write!(f, "{line}:{start}-{}", self.end)
        } else {
            write!(f, "{line}:{start}")
        }
    }
}

/// Need to be able to unwrap an error fully in case it's threaded through
/// multiple layers of processing.
fn find_range(error: &anyhow::Error) -> Range<Size> {
    match error.downcast_ref::<IStrError>() {
        Some(e) => e.span(),
        None => Size::ZERO..Size::ZERO,
    }
}

/// The whole line which contains offset `at`.
fn line_at(data: &'static [u8], at: Size) -> &'static BStr {
    let at = at.as_usize().min(data.len());
    let start = memchr::memrchr(NL, &data[..at]).map_or(0, |n| n + 1);
    let end = memchr::memchr(NL, &data[at..]).map_or(data.len(), |n| at + n);
    BStr::new(&data[start..end])
}

/// Context attached to input errors.
#[derive(Debug)]
struct ErrorContext {
    path: PathBuf,
    pos: LineCol,
    line: &'static BStr,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{path}:{pos}: `{line}`",
            path = self.path.display(),
            pos = self.pos,
            line = self.line
        )
    }
}
