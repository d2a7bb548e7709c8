use core::fmt;
use core::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::error::LineCol;
use crate::input::{IStr, NL};

/// An offset into the input.
#[repr(transparent)]
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(usize);

impl Size {
    /// Default zero value.
    pub const ZERO: Self = Self(0);

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn usize_range(range: Range<Size>) -> Range<usize> {
        range.start.0..range.end.0
    }

    #[inline]
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    #[inline]
    pub(crate) fn checked_add(self, b: Size) -> Option<Self> {
        Some(Self(self.0.checked_add(b.0)?))
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.0 = self.0.saturating_add(n);
    }

    #[inline]
    pub(crate) fn saturating_add(self, n: Size) -> Self {
        Self(self.0.saturating_add(n.0))
    }
}

impl fmt::Debug for Size {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Get the line and columns covered by `span` in `data`.
pub(crate) fn pos_from(data: &[u8], span: Range<Size>) -> LineCol {
    let span = Size::usize_range(span);

    let Some(d) = data.get(..span.start) else {
        return LineCol::EMPTY;
    };

    let (line, start) = match memchr::memrchr(NL, d) {
        Some(last) => (memchr::memchr_iter(NL, d).count(), span.start - last - 1),
        None => (0, span.start),
    };

    let end = match data.get(span) {
        Some(rest) => start + memchr::memchr(NL, rest).unwrap_or(rest.len()),
        None => start,
    };

    LineCol::new(line, start, end)
}

/// Read the input at `path`.
///
/// The data is leaked to give it a static lifetime, which is fine since it
/// lives until the process exits anyway.
pub fn input(path: &Path) -> Result<IStr> {
    let data = std::fs::read(path).with_context(|| path.display().to_string())?;
    let data: &'static [u8] = Box::leak(data.into_boxed_slice());
    log::debug!("{}: read {} bytes", path.display(), data.len());
    Ok(IStr::new(data, Size::ZERO))
}
