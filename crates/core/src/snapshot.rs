//! Serializable snapshots of the stack
//!
//! `Value` shares tables through `Rc` and stores strings as raw bytes, so
//! it is not directly serializable. `TypedValue` is an owned mirror that
//! serde can write out, used for test fixtures and diagnostic reports.
//!
//! This is a debugging aid. It is not a storage or interchange format, and
//! nothing loads a snapshot back into a runtime.
//!
//! # Why BTreeMap?
//!
//! Table keys are rendered to their notation form and kept in a `BTreeMap`,
//! so the same stack always produces identical output regardless of the
//! runtime table's hash order.

use crate::notation::key_to_notation;
use crate::table::TableRef;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error while capturing or encoding a snapshot
#[derive(Debug)]
pub enum SnapshotError {
    /// A table contains itself
    Cycle,
    /// NaN or infinity cannot be represented
    NonFiniteNumber(f64),
    /// JSON encoding failed
    #[cfg(feature = "report-json")]
    Json(serde_json::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Cycle => write!(f, "cannot snapshot a table that contains itself"),
            SnapshotError::NonFiniteNumber(v) => {
                write!(f, "cannot snapshot non-finite number: {}", v)
            }
            #[cfg(feature = "report-json")]
            SnapshotError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "report-json")]
            SnapshotError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "report-json")]
impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

/// Owned, serializable mirror of `Value`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    Nil,
    Boolean(bool),
    Number(f64),
    /// Invalid UTF-8 is replaced lossily
    String(String),
    /// 2, 3 or 4 components
    Vector(Vec<f32>),
    /// Rows: right, front, up, position
    Matrix([[f32; 3]; 4]),
    Handle(u32),
    /// Keys in notation form (`1`, `"name"`, `true`)
    Table(BTreeMap<String, TypedValue>),
}

impl TypedValue {
    /// Convert a runtime value, failing on cycles and non-finite numbers
    pub fn from_value(value: &Value) -> Result<Self, SnapshotError> {
        let mut path = Vec::new();
        Self::convert(value, &mut path)
    }

    fn convert(value: &Value, path: &mut Vec<usize>) -> Result<Self, SnapshotError> {
        Ok(match value {
            Value::Nil => TypedValue::Nil,
            Value::Boolean(b) => TypedValue::Boolean(*b),
            Value::Number(n) => TypedValue::Number(finite(*n)?),
            Value::String(s) => {
                TypedValue::String(String::from_utf8_lossy(s.as_bytes()).into_owned())
            }
            Value::Vector2(v) => TypedValue::Vector(finite_components(&[v.x, v.y])?),
            Value::Vector3(v) => TypedValue::Vector(finite_components(&[v.x, v.y, v.z])?),
            Value::Vector4(v) => TypedValue::Vector(finite_components(&[v.x, v.y, v.z, v.w])?),
            Value::Matrix(m) => {
                let mut rows = [[0.0f32; 3]; 4];
                for (row, v) in rows.iter_mut().zip(m.rows()) {
                    let c = finite_components(&[v.x, v.y, v.z])?;
                    row.copy_from_slice(&c);
                }
                TypedValue::Matrix(rows)
            }
            Value::Handle(h) => TypedValue::Handle(h.id()),
            Value::Table(t) => Self::convert_table(t, path)?,
        })
    }

    fn convert_table(table: &TableRef, path: &mut Vec<usize>) -> Result<Self, SnapshotError> {
        if path.contains(&table.id()) {
            return Err(SnapshotError::Cycle);
        }
        path.push(table.id());
        let mut out = BTreeMap::new();
        for (key, value) in table.borrow().entries() {
            out.insert(key_to_notation(key), Self::convert(value, path)?);
        }
        path.pop();
        Ok(TypedValue::Table(out))
    }
}

fn finite(n: f64) -> Result<f64, SnapshotError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(SnapshotError::NonFiniteNumber(n))
    }
}

fn finite_components(components: &[f32]) -> Result<Vec<f32>, SnapshotError> {
    components
        .iter()
        .map(|c| finite(f64::from(*c)).map(|_| *c))
        .collect()
}

/// Captured stack contents, bottom to top
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackSnapshot {
    pub depth: usize,
    pub slots: Vec<TypedValue>,
}

impl StackSnapshot {
    pub fn capture<'a>(values: impl Iterator<Item = &'a Value>) -> Result<Self, SnapshotError> {
        let slots = values
            .map(TypedValue::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StackSnapshot {
            depth: slots.len(),
            slots,
        })
    }

    #[cfg(feature = "report-json")]
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    #[cfg(feature = "report-json")]
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
