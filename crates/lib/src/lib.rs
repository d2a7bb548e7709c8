//! Support library for the command line driver: input parsing, options,
//! output and benchmarking.

pub mod cli;
pub mod env;
pub mod input;

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::input::{IStr, Skip, Split};
    pub use anyhow::{anyhow, bail, Context, Result};
    pub use bstr::{BStr, ByteSlice};
}

/// Implement [input::FromInput] for `$out` by parsing `$ty` and converting
/// it with the given block.
///
/// Errors raised by the block are reported with the span of the input which
/// was parsed.
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($pat:pat))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($pat))?]: $ty| -> $($rest)*);
    };

    (|[$($value:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let original = *p;

                let Some(value) = <$ty as $crate::input::FromInput>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$($value)*: $ty| -> core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        let span = original.index()..p.index();
                        *p = original;
                        Err($crate::input::IStrError::boxed(span, e))
                    }
                }
            }
        }
    };
}
