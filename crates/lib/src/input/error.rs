use core::ops::Range;

use thiserror::Error;

use crate::env::Size;

/// The kind of an [IStrError].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("not an integer or integer overflow `{0}`")]
    NotInteger(&'static str),
    #[error("not utf-8")]
    NotUtf8,
    #[error("bad array; expected {0}, but got {1}")]
    BadArray(usize, usize),
    #[error("expected line")]
    ExpectedLine,
    #[error("expected tuple of length `{0}`")]
    ExpectedTuple(usize),
    #[error("unexpected eof")]
    UnexpectedEof,
    #[error(transparent)]
    Boxed(anyhow::Error),
}

/// Error raised through string processing.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct IStrError {
    pub(crate) span: Range<Size>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<Size>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    /// Wrap an arbitrary error raised while converting the given span.
    #[inline]
    pub fn boxed(span: Range<Size>, error: anyhow::Error) -> Self {
        Self::new(span, ErrorKind::Boxed(error))
    }

    /// Byte span of the input which caused the error.
    #[inline]
    pub fn span(&self) -> Range<Size> {
        self.span.clone()
    }

    /// Access the kind of the error.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
