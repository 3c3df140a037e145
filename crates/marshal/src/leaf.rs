//! Leaf pushers: one host scalar, one runtime slot
//!
//! Object identities have no pusher of their own. A handle is pushed only
//! through a pointer to a [`ScriptEntity`](crate::ScriptEntity).

use crate::Push;
use scriptpush_core::{ByteString, Matrix, ScriptRuntime, Vector2, Vector3, Vector4};
use std::borrow::Cow;

/// Explicit nil
///
/// Pushes the runtime's nil value. `()` is not pushable; use this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nil;

impl Push for Nil {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_nil();
    }
}

// The runtime has a single numeric type; every width widens (or rounds) to it
macro_rules! impl_push_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl Push for $t {
                fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
                    rt.push_number(*self as f64);
                }
            }
        )*
    };
}

impl_push_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Push for bool {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_boolean(*self);
    }
}

impl Push for str {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_lstring(self.as_bytes());
    }
}

impl Push for String {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_lstring(self.as_bytes());
    }
}

impl Push for Cow<'_, str> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_lstring(self.as_bytes());
    }
}

/// Raw runtime strings keep non-UTF-8 bytes
impl Push for ByteString {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_lstring(self.as_bytes());
    }
}

impl Push for Vector2 {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_vector2(*self);
    }
}

impl Push for Vector3 {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_vector3(*self);
    }
}

impl Push for Vector4 {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_vector4(*self);
    }
}

impl Push for Matrix {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_matrix(*self);
    }
}
