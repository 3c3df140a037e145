//! ScriptRuntime: the primitive operations a scripting runtime exposes
//!
//! Everything the marshaling layer does is expressed in these primitives.
//! Each `push_*` adds exactly one slot. The table stores consume the
//! values above the table and leave the table where it was, so building a
//! container never changes the depth seen by the caller except for the
//! table itself.
//!
//! # Indices
//!
//! Positive indices are absolute and 1-based from the bottom of the stack.
//! Negative indices are relative to the top: `-1` is the top slot.
//!
//! # Faults
//!
//! Primitives do not return errors. Misuse (bad index, invalid key,
//! overflow) faults the whole runtime, which for an in-process runtime
//! means a panic.

use crate::geometry::{Matrix, Vector2, Vector3, Vector4};
use crate::handle::ObjectIdentity;

pub trait ScriptRuntime {
    /// Current stack depth
    fn top(&self) -> usize;

    fn push_nil(&mut self);

    fn push_boolean(&mut self, value: bool);

    fn push_number(&mut self, value: f64);

    /// Push a length-delimited byte string
    ///
    /// The runtime copies `bytes`; embedded NUL bytes are preserved.
    fn push_lstring(&mut self, bytes: &[u8]);

    fn push_vector2(&mut self, value: Vector2);

    fn push_vector3(&mut self, value: Vector3);

    fn push_vector4(&mut self, value: Vector4);

    fn push_matrix(&mut self, value: Matrix);

    /// Push the opaque handle registered for `identity`
    ///
    /// Identities unknown to the runtime's handle table push nil.
    fn push_handle(&mut self, identity: ObjectIdentity);

    /// Push a new, empty table sized for `narr` sequence slots and `nrec` other pairs
    fn create_table(&mut self, narr: usize, nrec: usize);

    /// Pop the top value and store it at integer key `n` of the table at `table_index`
    ///
    /// `table_index` is resolved before the pop.
    fn raw_set_index(&mut self, table_index: i32, n: i64);

    /// Pop a value (top) and a key (below it) and store the pair in the table at `table_index`
    ///
    /// `table_index` is resolved before the pops.
    fn set_table(&mut self, table_index: i32);

    /// Push UTF-8 text
    fn push_string(&mut self, value: &str) {
        self.push_lstring(value.as_bytes());
    }

    /// Push a new table with no size hints
    fn new_table(&mut self) {
        self.create_table(0, 0);
    }
}
