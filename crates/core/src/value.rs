use crate::geometry::{Matrix, Vector2, Vector3, Vector4};
use crate::handle::Handle;
use crate::table::TableRef;
use std::fmt;
use std::rc::Rc;

/// ByteString: the runtime's string type
///
/// Runtime strings are byte sequences, not necessarily UTF-8, and may
/// contain NUL bytes. The runtime always owns its own copy; nothing here
/// borrows from the host buffer it was created from.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString(Rc<[u8]>);

impl ByteString {
    /// Copy `bytes` into a new runtime string
    pub fn copy_from(bytes: &[u8]) -> Self {
        ByteString(Rc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// View as UTF-8 text, if it is valid UTF-8
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString::copy_from(s.as_bytes())
    }
}

/// Value: one slot of the runtime's operand stack
///
/// Scalars are stored inline. Tables are reference values: cloning a
/// `Value::Table` shares the table, and equality on tables is identity,
/// the same way the runtime compares them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,

    Boolean(bool),

    /// The runtime's single numeric type (IEEE 754 double)
    Number(f64),

    String(ByteString),

    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Matrix(Matrix),

    /// Opaque handle for a registered host object
    Handle(Handle),

    Table(TableRef),
}

impl Value {
    /// Name of the value's runtime type, as scripts would report it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Vector2(_) | Value::Vector3(_) | Value::Vector4(_) => "vector",
            Value::Matrix(_) => "matrix",
            Value::Handle(_) => "userdata",
            Value::Table(_) => "table",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String contents as UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.to_str(),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Handle(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(ByteString::from(s))
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Handle(h)
    }
}

impl From<TableRef> for Value {
    fn from(t: TableRef) -> Self {
        Value::Table(t)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::notation::{NotationConfig, value_to_notation};
        f.write_str(&value_to_notation(self, &NotationConfig::compact()))
    }
}
