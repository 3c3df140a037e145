//! Stack errors
//!
//! Returned by the inspection and `try_*` APIs of the reference VM. The
//! `ScriptRuntime` primitives themselves never return these: a failing
//! primitive is a runtime fault and panics with the error's message.

/// Error raised by a stack or table operation
#[derive(Debug, Clone, PartialEq)]
pub enum StackError {
    /// Index does not name a live slot
    IndexOutOfRange { index: i32, depth: usize },
    /// Operation needed a table at `index`
    NotATable { index: i32, found: &'static str },
    /// Value cannot be used as a table key (nil, NaN, vectors, matrices)
    InvalidKey(&'static str),
    /// Push would exceed the configured maximum depth
    Overflow { max_depth: usize },
    /// Operation needed more values than the stack holds
    Underflow { needed: usize, depth: usize },
}

impl std::fmt::Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackError::IndexOutOfRange { index, depth } => {
                write!(f, "index {} out of range (depth {})", index, depth)
            }
            StackError::NotATable { index, found } => {
                write!(f, "expected table at index {}, found {}", index, found)
            }
            StackError::InvalidKey(kind) => write!(f, "table index is {}", kind),
            StackError::Overflow { max_depth } => {
                write!(f, "stack overflow (max depth {})", max_depth)
            }
            StackError::Underflow { needed, depth } => {
                write!(f, "stack underflow (needed {}, depth {})", needed, depth)
            }
        }
    }
}

impl std::error::Error for StackError {}

/// Report a runtime fault and stop the current operation
///
/// The runtime's push primitives either succeed or fault the whole runtime;
/// there is no partial result to hand back to the caller.
#[track_caller]
pub(crate) fn fault(op: &str, err: StackError) -> ! {
    tracing::error!(op, error = %err, "runtime fault");
    panic!("{}: {}", op, err)
}
