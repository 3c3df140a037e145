//! scriptpush: push typed host values onto a scripting runtime's stack
//!
//! Every supported host type implements [`Push`]. The implementation is
//! picked at compile time from the value's static type; nothing here
//! inspects a type tag at run time, except the [`Argument`] wrapper whose
//! whole point is to carry one.
//!
//! ```
//! use scriptpush::{Vm, push};
//!
//! let mut vm = Vm::default();
//! push(&mut vm, &vec![10, 20, 30]);
//! push(&mut vm, &Some("name"));
//! push(&mut vm, &(1.5, 7, true));
//! assert_eq!(vm.depth(), 3);
//! ```
//!
//! # Shapes
//!
//! | Host type | Runtime value |
//! |-----------|---------------|
//! | integers, `f32`, `f64` | number |
//! | `bool` | boolean |
//! | [`Nil`], `Option::None` | nil |
//! | `str`, `String`, `Cow<str>`, [`ByteString`] | string (copied) |
//! | [`Vector2`]..[`Matrix`] | vector / matrix |
//! | `script_enum!` types | string (canonical name) |
//! | `Box`/`Rc`/`Arc`/raw pointer to a [`ScriptEntity`] | handle |
//! | [`OneOf2`]..[`OneOf6`] | whichever alternative is held |
//! | `[T; N]`, `[T]`, `Vec`, `VecDeque`, tuples | sequence table, 1-based |
//! | `HashMap`, `BTreeMap` with [`PushKey`] keys | key/value table |
//! | [`Argument`], [`Arguments`] | tagged at run time |
//!
//! # Stack balance
//!
//! One call to [`push`] adds exactly one slot, however deeply the value is
//! nested. Containers are created first and every element pushed into them
//! is consumed by the store that follows it, so the finished table is the
//! only thing left behind.
//!
//! # Modules
//!
//! - `leaf`: scalars, text, geometry
//! - `enums`: `ScriptEnum` and the `script_enum!` macro
//! - `entity`: `ScriptEntity` and pointer pushers
//! - `composite`: options, arrays, sequences, maps (`PushKey` keys), tuples
//! - `union`: `OneOf2`..`OneOf6` tagged unions
//! - `guard`: the generic `Argument` path and its empty-value check

mod composite;
mod entity;
mod enums;
mod guard;
mod leaf;
mod union;

pub use composite::PushKey;
pub use entity::{ScriptEntity, script_identity};
pub use enums::{ScriptEnum, push_enum};
pub use leaf::Nil;
pub use union::{OneOf2, OneOf3, OneOf4, OneOf5, OneOf6};

// Runtime-side types a caller needs alongside `push`
pub use scriptpush_core::{
    Argument, ArgumentType, Arguments, ByteString, Handle, HandleTable, Matrix, ObjectIdentity,
    ScriptRuntime, StackConfig, Value, Vector2, Vector3, Vector4, Vm,
};

/// A host value that can be pushed as exactly one runtime value
///
/// Implementations push one slot onto `rt` and leave everything below it
/// untouched. Composite implementations push their elements through
/// [`push`] and consume each one with a table store before moving on.
pub trait Push {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R);
}

/// Push `value` onto `rt`
///
/// This is the entry point composite pushers recurse through.
pub fn push<T, R>(rt: &mut R, value: &T)
where
    T: Push + ?Sized,
    R: ScriptRuntime + ?Sized,
{
    let before = rt.top();
    value.push(rt);
    let after = rt.top();
    tracing::trace!(ty = std::any::type_name::<T>(), depth = after, "push");
    debug_assert_eq!(
        after,
        before + 1,
        "pushing {} must add exactly one slot",
        std::any::type_name::<T>()
    );
}

impl<T: Push + ?Sized> Push for &T {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        (**self).push(rt)
    }
}

impl<T: Push + ?Sized> Push for &mut T {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        (**self).push(rt)
    }
}
