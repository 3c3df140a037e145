//! Reference pushers for host objects with identity
//!
//! Only types that implement [`ScriptEntity`] can be pushed through a
//! pointer. The push records the object's address and hands it to the
//! runtime's handle table; it never dereferences a raw pointer, never
//! changes ownership and never touches a reference count.

use crate::Push;
use scriptpush_core::{ObjectIdentity, ScriptRuntime};
use std::rc::Rc;
use std::sync::Arc;

/// A host object with a stable identity that scripts see as a handle
///
/// Implement this for every type (or trait object) that is registered
/// in the runtime's handle table. Trait objects qualify when their trait
/// has `ScriptEntity` as a supertrait. The identity is always the object's
/// address; register it with [`script_identity`].
///
/// A bare identity has no pusher, so an object that never opted in cannot
/// reach the handle path:
///
/// ```compile_fail
/// use scriptpush::{ObjectIdentity, Vm, push};
///
/// let plain = 5u32;
/// push(&mut Vm::default(), &ObjectIdentity::of(&plain));
/// ```
///
/// Scripts still receive a handle by identity through
/// [`Argument::Handle`](crate::Argument::Handle).
pub trait ScriptEntity {}

/// Identity an entity is registered and pushed under
///
/// Every pointer pusher goes through this address, so `Box`, `Rc`, `Arc`
/// and raw pointers to the same object push the same handle.
pub fn script_identity<T: ScriptEntity + ?Sized>(entity: &T) -> ObjectIdentity {
    ObjectIdentity::of(entity)
}

impl<T: ScriptEntity + ?Sized> Push for Box<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_handle(script_identity(&**self));
    }
}

impl<T: ScriptEntity + ?Sized> Push for Rc<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_handle(script_identity(&**self));
    }
}

impl<T: ScriptEntity + ?Sized> Push for Arc<T> {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.push_handle(script_identity(&**self));
    }
}

impl<T: ScriptEntity + ?Sized> Push for *const T {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_raw(rt, *self);
    }
}

impl<T: ScriptEntity + ?Sized> Push for *mut T {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        push_raw(rt, self.cast_const());
    }
}

fn push_raw<T: ?Sized, R: ScriptRuntime + ?Sized>(rt: &mut R, ptr: *const T) {
    if ptr.is_null() {
        rt.push_nil();
    } else {
        rt.push_handle(ObjectIdentity::from_ptr(ptr));
    }
}
