//! Handle table: opaque handles for host objects with identity
//!
//! The runtime never sees host memory. A host object is identified by its
//! address (`ObjectIdentity`), registered once, and from then on pushed as a
//! small opaque `Handle`. Scripts hand the handle back and the host resolves
//! it to the same identity.
//!
//! Identities are only compared, never dereferenced, so recording one is a
//! read-only observation of the object.

use std::collections::HashMap;
use std::fmt;

/// Address-based identity of a host object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentity(usize);

impl ObjectIdentity {
    /// Identity of the object behind a reference
    pub fn of<T: ?Sized>(object: &T) -> Self {
        Self::from_ptr(object as *const T)
    }

    /// Identity of the object behind a raw pointer (metadata is discarded)
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        ObjectIdentity(ptr.cast::<()>() as usize)
    }

    /// Raw address value
    pub fn addr(self) -> usize {
        self.0
    }

    /// True for the identity of a null pointer
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Opaque handle value as seen by scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    pub const fn from_raw(id: u32) -> Self {
        Handle(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

/// Bidirectional identity <-> handle registry
///
/// Handles are allocated sequentially starting at 1 and are not reused
/// while the table lives, so a stale handle can never alias a newer object.
#[derive(Debug)]
pub struct HandleTable {
    by_identity: HashMap<ObjectIdentity, Handle>,
    by_handle: HashMap<Handle, ObjectIdentity>,
    next_id: u32,
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            by_identity: HashMap::new(),
            by_handle: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register an identity and return its handle
    ///
    /// Registering the same identity again returns the existing handle.
    ///
    /// # Panics
    /// If the identity is null or the handle space is exhausted.
    pub fn register(&mut self, identity: ObjectIdentity) -> Handle {
        assert!(!identity.is_null(), "register: null identity");
        if let Some(handle) = self.by_identity.get(&identity) {
            return *handle;
        }
        let id = self.next_id;
        self.next_id = id.checked_add(1).expect("register: handle space exhausted");
        let handle = Handle(id);
        self.by_identity.insert(identity, handle);
        self.by_handle.insert(handle, identity);
        tracing::trace!(%handle, addr = identity.addr(), "registered handle");
        handle
    }

    /// Remove an identity; returns the handle it had, if any
    pub fn unregister(&mut self, identity: ObjectIdentity) -> Option<Handle> {
        let handle = self.by_identity.remove(&identity)?;
        self.by_handle.remove(&handle);
        tracing::trace!(%handle, "unregistered handle");
        Some(handle)
    }

    /// Handle currently assigned to an identity
    pub fn handle_of(&self, identity: ObjectIdentity) -> Option<Handle> {
        self.by_identity.get(&identity).copied()
    }

    /// Identity behind a handle
    pub fn resolve(&self, handle: Handle) -> Option<ObjectIdentity> {
        self.by_handle.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}
