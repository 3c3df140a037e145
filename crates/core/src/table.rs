//! Runtime tables
//!
//! A table is the runtime's only aggregate. The same structure serves as
//! an indexed sequence (keys 1..n) and as an associative map; which one a
//! table "is" depends only on the keys stored in it.

use crate::error::StackError;
use crate::handle::Handle;
use crate::value::{ByteString, Value};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// TableKey: hashable form of a Value used as a table key
///
/// Numbers with an integral value normalize to `Integer`, so `1.0` and `1`
/// name the same slot. Other numbers are keyed by their bit pattern.
/// Nil and NaN are never valid keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Integer(i64),
    Number(u64),
    Boolean(bool),
    String(ByteString),
    Handle(Handle),
    Table(TableRef),
}

impl TableKey {
    /// Convert a Value into a key, rejecting values the runtime cannot index by
    pub fn from_value(value: &Value) -> Result<TableKey, StackError> {
        match value {
            Value::Nil => Err(StackError::InvalidKey("nil")),
            Value::Number(n) => Self::from_number(*n),
            Value::Boolean(b) => Ok(TableKey::Boolean(*b)),
            Value::String(s) => Ok(TableKey::String(s.clone())),
            Value::Handle(h) => Ok(TableKey::Handle(*h)),
            Value::Table(t) => Ok(TableKey::Table(t.clone())),
            Value::Vector2(_) | Value::Vector3(_) | Value::Vector4(_) => {
                Err(StackError::InvalidKey("a vector"))
            }
            Value::Matrix(_) => Err(StackError::InvalidKey("a matrix")),
        }
    }

    fn from_number(n: f64) -> Result<TableKey, StackError> {
        if n.is_nan() {
            return Err(StackError::InvalidKey("NaN"));
        }
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Ok(TableKey::Integer(n as i64))
        } else {
            Ok(TableKey::Number(n.to_bits()))
        }
    }

    /// Convert the key back to the Value it stands for
    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Integer(i) => Value::Number(*i as f64),
            TableKey::Number(bits) => Value::Number(f64::from_bits(*bits)),
            TableKey::Boolean(b) => Value::Boolean(*b),
            TableKey::String(s) => Value::String(s.clone()),
            TableKey::Handle(h) => Value::Handle(*h),
            TableKey::Table(t) => Value::Table(t.clone()),
        }
    }
}

impl From<i64> for TableKey {
    fn from(i: i64) -> Self {
        TableKey::Integer(i)
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        TableKey::String(ByteString::from(s))
    }
}

/// Table contents
#[derive(Debug, Default)]
pub struct Table {
    entries: HashMap<TableKey, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with room for `narr` sequence slots and `nrec` other pairs
    pub fn with_capacity(narr: usize, nrec: usize) -> Self {
        Table {
            entries: HashMap::with_capacity(narr.saturating_add(nrec)),
        }
    }

    /// Store a pair; storing nil removes the key
    pub fn set(&mut self, key: TableKey, value: Value) {
        if value.is_nil() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &TableKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Value at integer key `i`, nil when absent
    pub fn get_index(&self, i: i64) -> Value {
        self.entries
            .get(&TableKey::Integer(i))
            .cloned()
            .unwrap_or(Value::Nil)
    }

    /// Sequence border: the largest `n` such that keys `1..=n` are all present
    pub fn len(&self) -> usize {
        let mut n = 0usize;
        while self.entries.contains_key(&TableKey::Integer(n as i64 + 1)) {
            n += 1;
        }
        n
    }

    /// Number of stored pairs, sequence part included
    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all pairs (unordered)
    pub fn entries(&self) -> impl Iterator<Item = (&TableKey, &Value)> {
        self.entries.iter()
    }
}

/// TableRef: shared handle to a table living in the runtime
///
/// Equality and hashing are by identity.
#[derive(Clone)]
pub struct TableRef(Rc<RefCell<Table>>);

impl TableRef {
    pub fn new(table: Table) -> Self {
        TableRef(Rc::new(RefCell::new(table)))
    }

    pub fn borrow(&self) -> Ref<'_, Table> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Table> {
        self.0.borrow_mut()
    }

    /// Stable identity of the underlying table (for cycle detection and rendering)
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &TableRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Sequence border of the table
    pub fn len(&self) -> usize {
        self.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.borrow().is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.borrow().pair_count()
    }

    /// Value at integer key `i`, nil when absent
    pub fn get_index(&self, i: i64) -> Value {
        self.borrow().get_index(i)
    }

    /// Value stored under `key`, nil when absent or when `key` cannot be a key
    pub fn get(&self, key: &Value) -> Value {
        match TableKey::from_value(key) {
            Ok(k) => self.borrow().get(&k).cloned().unwrap_or(Value::Nil),
            Err(_) => Value::Nil,
        }
    }

    /// Snapshot of all pairs as Values (unordered)
    pub fn pairs(&self) -> Vec<(Value, Value)> {
        self.borrow()
            .entries()
            .map(|(k, v)| (k.to_value(), v.clone()))
            .collect()
    }
}

impl PartialEq for TableRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TableRef {}

// Tables may reference themselves, so Debug never walks the contents
impl std::fmt::Debug for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(t) => write!(f, "TableRef(0x{:x}, pairs={})", self.id(), t.pair_count()),
            Err(_) => write!(f, "TableRef(0x{:x}, <borrowed>)", self.id()),
        }
    }
}

impl Hash for TableRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
