//! Input parser.
//!
//! Input is processed through an [IStr], a cursor over the bytes of the input
//! which keeps track of its offset so that errors can point back into the
//! original file.

mod error;

use core::fmt;
use core::mem;
use core::ops;
use std::str::from_utf8;

use arrayvec::ArrayVec;
use bstr::BStr;

pub use self::error::{ErrorKind, IStrError};

pub(self) type Result<T> = std::result::Result<T, IStrError>;
use crate::env::Size;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
#[derive(Clone, Copy)]
pub struct IStr {
    /// The remaining data being parsed.
    data: &'static [u8],
    /// Offset of `data` in the original input.
    index: Size,
}

impl IStr {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the current input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &'static BStr {
        BStr::new(self.data)
    }

    /// Parse the next value as T.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        T::from_input(self)
    }

    /// Try parse the next value as `T`, returns `None` if there is no more
    /// data to process.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, errors if there are no more lines.
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let index = self.index;

        let Some(line) = self.try_line()? else {
            return Err(IStrError::new(index..self.index, ErrorKind::ExpectedLine));
        };

        Ok(line)
    }

    /// Parse the next non-blank line as `T`, returns `Ok(None)` once the
    /// input is exhausted.
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        loop {
            let Some(mut line) = self.split_once(NL) else {
                return Ok(None);
            };

            if line.data.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return line.try_next();
        }
    }

    /// Try to parse the next whitespace-delimited word.
    pub fn try_next_word<T>(&mut self) -> Result<Option<(Size, T)>>
    where
        T: FromInput,
    {
        let s = self.find(0, |b| !u8::is_ascii_whitespace(b));
        let n = self.find(s, u8::is_ascii_whitespace);

        if s == n {
            return Ok(None);
        }

        let Some(mut input) = self.slice(s..n) else {
            return Ok(None);
        };

        let Some(value) = T::try_from_input(&mut input)? else {
            return Ok(None);
        };

        self.advance(n);
        Ok(Some((Size::new(s), value)))
    }

    /// Split on every occurence of `byte`.
    #[inline]
    fn splitn(&mut self, byte: u8) -> impl InputIterator + '_ {
        return Iterator { input: self, byte };

        struct Iterator<'a> {
            input: &'a mut IStr,
            byte: u8,
        }

        impl<'a> InputIterator for Iterator<'a> {
            #[inline]
            fn index(&self) -> Size {
                self.input.index
            }

            #[inline]
            fn next(&mut self) -> Option<IStr> {
                self.input.split_once(self.byte)
            }
        }
    }

    /// Split once at the given byte or until the end of string, returning
    /// the consumed part.
    fn split_once(&mut self, b: u8) -> Option<IStr> {
        if self.data.is_empty() {
            return None;
        }

        let Some(at) = memchr::memchr(b, self.data) else {
            let index = self.index;
            self.index.advance(self.data.len());
            let data = mem::take(&mut self.data);
            return Some(IStr::new(data, index));
        };

        let index = self.index;
        let data = self.data.get(..at)?;
        self.advance(at.checked_add(1)?);
        Some(IStr::new(data, index))
    }

    /// Find by predicate.
    fn find(&self, mut n: usize, p: fn(&u8) -> bool) -> usize {
        while let Some(c) = self.data.get(n) {
            if p(c) {
                break;
            }

            n += 1;
        }

        n
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.data = self.data.get(n..).unwrap_or_default();
        self.index.advance(n);
    }

    /// Construct a sub-range.
    #[inline]
    fn slice(&self, range: ops::Range<usize>) -> Option<IStr> {
        let index = self.index.checked_add(Size::new(range.start))?;

        Some(Self {
            data: self.data.get(range)?,
            index,
        })
    }
}

impl fmt::Debug for IStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IStr")
            .field("data", &self.as_bstr())
            .field("index", &self.index)
            .finish()
    }
}

/// A value that can be parsed from input.
pub trait FromInput: Sized {
    /// Error kind raised by [FromInput::from_input] when there is no value.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Try to parse a value, returns `Ok(None)` if there is nothing to parse.
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut IStr) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(IStrError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

/// Iterator over inputs.
pub trait InputIterator {
    /// Current index of the input iterator.
    fn index(&self) -> Size;

    /// Get next input.
    fn next(&mut self) -> Option<IStr>;
}

/// Parse something from a sequence of inputs.
pub trait FromInputIter: Sized {
    /// Parse from the inputs, returns `Ok(None)` if there are too few of
    /// them.
    fn from_input_iter<I>(inputs: I) -> Result<Option<Self>>
    where
        I: InputIterator;
}

macro_rules! tuple {
    ($num:literal => $first:ident $first_id:ident $(, $rest:ident $rest_id:ident)* $(,)?) => {
        impl<$first, $($rest,)*> FromInput for ($first, $($rest, )*)
        where
            $first: FromInput,
            $($rest: FromInput,)*
        {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedTuple($num)
            }

            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                let Some($first_id) = p.try_next()? else {
                    return Ok(None);
                };

                $(
                    let Some($rest_id) = p.try_next()? else {
                        return Ok(None);
                    };
                )*

                Ok(Some(($first_id, $($rest_id,)*)))
            }
        }

        impl<$first, $($rest,)*> FromInputIter for ($first, $($rest,)*)
        where
            $first: FromInput,
            $($rest: FromInput,)*
        {
            #[inline]
            fn from_input_iter<I>(mut inputs: I) -> Result<Option<Self>>
            where
                I: InputIterator
            {
                let Some(mut $first_id) = inputs.next() else {
                    return Ok(None);
                };

                $(
                    let Some(mut $rest_id) = inputs.next() else {
                        return Ok(None);
                    };
                )*

                let Some($first_id) = <$first>::try_from_input(&mut $first_id)? else {
                    return Ok(None);
                };

                $(
                    let Some($rest_id) = <$rest>::try_from_input(&mut $rest_id)? else {
                        return Ok(None);
                    };
                )*

                Ok(Some(($first_id, $($rest_id,)*)))
            }
        }
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromInput for $ty {
                #[inline]
                fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                    let index = p.index;

                    let Some((n, word)) = p.try_next_word::<&str>()? else {
                        return Ok(None);
                    };

                    let Ok(value) = str::parse(word) else {
                        let start = index.saturating_add(n);
                        let end = start.saturating_add(Size::new(word.len()));
                        return Err(IStrError::new(start..end, ErrorKind::NotInteger(word)));
                    };

                    Ok(Some(value))
                }
            }
        )*
    };
}

tuple!(2 => A a, B b);

integer!(u32, i32, i64);

impl FromInput for IStr {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let input = *p;
        p.advance(p.len());
        Ok(Some(input))
    }
}

impl FromInput for &'static str {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;
        let data = mem::take(&mut p.data);
        p.index.advance(data.len());

        let Ok(data) = from_utf8(data) else {
            return Err(IStrError::new(index..p.index, ErrorKind::NotUtf8));
        };

        Ok(Some(data))
    }
}

/// Split on the character `D`, parsing each part into an element of `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Split<const D: char, T>(pub T);

impl<const D: char, T> FromInput for Split<D, T>
where
    T: FromInputIter,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let it = p.splitn(D as u8);

        let Some(out) = T::from_input_iter(it)? else {
            return Ok(None);
        };

        Ok(Some(Self(out)))
    }
}

impl<const N: usize, T> FromInputIter for [T; N]
where
    T: FromInput,
{
    fn from_input_iter<I>(mut it: I) -> Result<Option<Self>>
    where
        I: InputIterator,
    {
        let index = it.index();
        let mut array = ArrayVec::<T, N>::new();

        while array.remaining_capacity() > 0 {
            let Some(mut value) = it.next() else {
                break;
            };

            let Some(value) = T::try_from_input(&mut value)? else {
                return Ok(None);
            };

            array.push(value);
        }

        match array.into_inner() {
            Ok(array) => Ok(Some(array)),
            Err(array) => Err(IStrError::new(
                index..it.index(),
                ErrorKind::BadArray(N, array.len()),
            )),
        }
    }
}

/// Parses successfully without consuming anything.
#[non_exhaustive]
pub struct Skip;

impl FromInput for Skip {
    #[inline]
    fn try_from_input(_: &mut IStr) -> Result<Option<Self>> {
        Ok(Some(Self))
    }
}
