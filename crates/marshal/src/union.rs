//! Tagged unions over a closed set of alternatives
//!
//! `OneOfN` holds exactly one of its `N` alternatives and pushes whichever
//! it holds, as if that value had been pushed directly. Wrap it in `Option`
//! for a union that may also be empty.

use crate::Push;
use scriptpush_core::ScriptRuntime;

macro_rules! one_of {
    ($(#[$meta:meta])* $name:ident { $($alt:ident),+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name<$($alt),+> {
            $($alt($alt)),+
        }

        impl<$($alt: Push),+> Push for $name<$($alt),+> {
            fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
                match self {
                    $($name::$alt(value) => crate::push(rt, value)),+
                }
            }
        }
    };
}

one_of!(
    /// One of two alternatives
    OneOf2 { A, B }
);
one_of!(
    /// One of three alternatives
    OneOf3 { A, B, C }
);
one_of!(OneOf4 { A, B, C, D });
one_of!(OneOf5 { A, B, C, D, E });
one_of!(OneOf6 { A, B, C, D, E, F });
