//! Composite pushers
//!
//! Each composite creates one table, pushes its elements through
//! [`crate::push`] and stores each element as soon as it is pushed. The
//! store pops the element, so the stack never holds more than the table
//! plus one key/value pair above the caller's depth. Sequence positions
//! are 1-based on the runtime side: host element `k` lands at index `k + 1`.

use crate::Push;
use scriptpush_core::{ByteString, ScriptRuntime};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

/// A host value that always pushes a valid table key
///
/// Map keys must implement this. Nil and NaN cannot index a table and
/// vectors have no key form, so `Option`, [`Nil`](crate::Nil), floats,
/// geometry and `Argument` are not keys. Entity pointers are not keys
/// either: an unregistered entity pushes nil.
///
/// ```compile_fail
/// use scriptpush::{Vm, push};
/// use std::collections::BTreeMap;
///
/// let mut map: BTreeMap<Option<&str>, i32> = BTreeMap::new();
/// map.insert(None, 1);
/// push(&mut Vm::default(), &map);
/// ```
pub trait PushKey: Push {}

macro_rules! impl_push_key {
    ($($t:ty),* $(,)?) => {
        $(impl PushKey for $t {})*
    };
}

impl_push_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, str, String, ByteString);

impl PushKey for Cow<'_, str> {}

impl<T: PushKey + ?Sized> PushKey for &T {}

impl<T: PushKey + ?Sized> PushKey for &mut T {}

impl<T: Push> Push for Option<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        match self {
            Some(value) => crate::push(rt, value),
            None => rt.push_nil(),
        }
    }
}

/// Sequence built with the raw index store, table at -2
fn push_indexed<'a, T, I, R>(rt: &mut R, len: usize, items: I)
where
    T: Push + 'a,
    I: Iterator<Item = &'a T>,
    R: ScriptRuntime + ?Sized,
{
    rt.create_table(len, 0);
    for (i, item) in items.enumerate() {
        crate::push(rt, item);
        rt.raw_set_index(-2, i as i64 + 1);
    }
}

/// Sequence built from explicit key/value pairs, table at -3
fn push_keyed_sequence<'a, T, I, R>(rt: &mut R, len: usize, items: I)
where
    T: Push + 'a,
    I: Iterator<Item = &'a T>,
    R: ScriptRuntime + ?Sized,
{
    rt.create_table(len, 0);
    for (i, item) in items.enumerate() {
        rt.push_number((i + 1) as f64);
        crate::push(rt, item);
        rt.set_table(-3);
    }
}

fn push_map<'a, K, V, I, R>(rt: &mut R, len: usize, entries: I)
where
    K: PushKey + 'a,
    V: Push + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
    R: ScriptRuntime + ?Sized,
{
    rt.create_table(0, len);
    for (key, value) in entries {
        crate::push(rt, key);
        crate::push(rt, value);
        rt.set_table(-3);
    }
}

impl<T: Push, const N: usize> Push for [T; N] {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_indexed(rt, N, self.iter());
    }
}

impl<T: Push> Push for [T] {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_indexed(rt, self.len(), self.iter());
    }
}

impl<T: Push> Push for Vec<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_keyed_sequence(rt, self.len(), self.iter());
    }
}

impl<T: Push> Push for VecDeque<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_keyed_sequence(rt, self.len(), self.iter());
    }
}

// Entry order is whatever the map iterates in
impl<K: PushKey, V: Push, S: BuildHasher> Push for HashMap<K, V, S> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_map(rt, self.len(), self.iter());
    }
}

impl<K: PushKey, V: Push> Push for BTreeMap<K, V> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_map(rt, self.len(), self.iter());
    }
}

// Tuples become sequence tables: element `$idx` at index `$idx + 1`
macro_rules! impl_push_tuple {
    ($len:expr => $($idx:tt $t:ident),+) => {
        impl<$($t: Push),+> Push for ($($t,)+) {
            fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
                rt.create_table($len, 0);
                $(
                    crate::push(rt, &self.$idx);
                    rt.raw_set_index(-2, $idx + 1);
                )+
            }
        }
    };
}

impl_push_tuple!(1 => 0 A);
impl_push_tuple!(2 => 0 A, 1 B);
impl_push_tuple!(3 => 0 A, 1 B, 2 C);
impl_push_tuple!(4 => 0 A, 1 B, 2 C, 3 D);
impl_push_tuple!(5 => 0 A, 1 B, 2 C, 3 D, 4 E);
impl_push_tuple!(6 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_push_tuple!(7 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_push_tuple!(8 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_push_tuple!(9 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_push_tuple!(10 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);
impl_push_tuple!(11 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K);
impl_push_tuple!(12 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L);
