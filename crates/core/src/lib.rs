//! scriptpush core: the runtime side of host-to-script marshaling
//!
//! This crate provides everything the marshaling layer pushes *into*: a
//! stack-based scripting runtime expressed as a trait, plus an in-process
//! reference implementation of it.
//!
//! Key design principles:
//! - ScriptRuntime: the primitive operations (push one value, build a table)
//! - Value: what lives in a stack slot (nil, number, string, table, ...)
//! - Vm: a growable slot array with the same stack discipline as the runtime
//!
//! # Modules
//!
//! - `runtime`: The `ScriptRuntime` primitive trait
//! - `stack`: `Vm`, the reference runtime
//! - `value`: Stack slot values and runtime byte strings
//! - `table`: Runtime tables, keys and shared table references
//! - `geometry`: Vector and matrix value types
//! - `handle`: Object identities and the handle table
//! - `argument`: Dynamically typed `Argument` / `Arguments` wrappers
//! - `config`: Stack configuration from env vars and TOML
//! - `error`: Stack operation errors
//! - `notation`: Table-constructor rendering of values
//! - `snapshot`: Serializable stack snapshots

pub mod argument;
pub mod config;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod notation;
pub mod runtime;
pub mod snapshot;
pub mod stack;
pub mod table;
pub mod value;

pub use argument::{Argument, ArgumentType, Arguments};
pub use config::{ConfigError, StackConfig};
pub use error::StackError;
pub use geometry::{Matrix, Vector2, Vector3, Vector4};
pub use handle::{Handle, HandleTable, ObjectIdentity};
pub use notation::{NotationConfig, value_to_notation};
pub use runtime::ScriptRuntime;
pub use snapshot::{SnapshotError, StackSnapshot, TypedValue};
pub use stack::Vm;
pub use table::{Table, TableKey, TableRef};
pub use value::{ByteString, Value};
