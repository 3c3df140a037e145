//! Table-constructor notation
//!
//! Renders runtime values the way a script would write them literally.
//! Used by `Vm::dump`, `Display for Value` and trace output.
//!
//! # Format Examples
//!
//! - Number: `42`, `1.5`
//! - Boolean / nil: `true`, `nil`
//! - String: `"hello"` (with escaping)
//! - Sequence: `{10, 20, 30}`
//! - Map: `{["a"] = 1, ["b"] = 2}`
//! - Mixed: `{1, 2, [5] = 3, ["x"] = true}`
//! - Vector: `vector3(1, 2, 3)`
//! - Handle: `handle#7`

use crate::geometry::Vector3;
use crate::table::{TableKey, TableRef};
use crate::value::{ByteString, Value};

/// Configuration for notation output
#[derive(Clone)]
pub struct NotationConfig {
    /// One entry per line with indentation
    pub pretty: bool,
    /// Spaces per indentation level
    pub indent: usize,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl NotationConfig {
    /// Single-line output
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

/// Format a Value to notation
pub fn value_to_notation(value: &Value, config: &NotationConfig) -> String {
    let mut buf = String::new();
    let mut path = Vec::new();
    format_value(value, config, 0, &mut path, &mut buf);
    buf
}

/// Format a table key as it appears inside `[...]`
pub fn key_to_notation(key: &TableKey) -> String {
    let mut buf = String::new();
    match key {
        TableKey::Integer(i) => buf.push_str(&i.to_string()),
        TableKey::Number(bits) => format_number(f64::from_bits(*bits), &mut buf),
        TableKey::Boolean(b) => buf.push_str(if *b { "true" } else { "false" }),
        TableKey::String(s) => format_string(s, &mut buf),
        TableKey::Handle(h) => buf.push_str(&h.to_string()),
        TableKey::Table(t) => buf.push_str(&format!("table: 0x{:x}", t.id())),
    }
    buf
}

// `path` holds the ids of the tables currently being rendered
fn format_value(
    value: &Value,
    config: &NotationConfig,
    depth: usize,
    path: &mut Vec<usize>,
    buf: &mut String,
) {
    match value {
        Value::Nil => buf.push_str("nil"),
        Value::Boolean(b) => buf.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => format_number(*n, buf),
        Value::String(s) => format_string(s, buf),
        Value::Vector2(v) => format_components("vector2", &[v.x, v.y], buf),
        Value::Vector3(v) => format_vector3(v, buf),
        Value::Vector4(v) => format_components("vector4", &[v.x, v.y, v.z, v.w], buf),
        Value::Matrix(m) => {
            buf.push_str("matrix(");
            for (i, row) in m.rows().iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                format_vector3(row, buf);
            }
            buf.push(')');
        }
        Value::Handle(h) => buf.push_str(&h.to_string()),
        Value::Table(t) => format_table(t, config, depth, path, buf),
    }
}

fn format_number(n: f64, buf: &mut String) {
    if n.is_nan() {
        buf.push_str("nan");
    } else if n.is_infinite() {
        buf.push_str(if n > 0.0 { "inf" } else { "-inf" });
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        buf.push_str(&(n as i64).to_string());
    } else {
        buf.push_str(&n.to_string());
    }
}

fn format_components(name: &str, components: &[f32], buf: &mut String) {
    buf.push_str(name);
    buf.push('(');
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        format_number(f64::from(*c), buf);
    }
    buf.push(')');
}

fn format_vector3(v: &Vector3, buf: &mut String) {
    format_components("vector3", &[v.x, v.y, v.z], buf);
}

/// Format a string with escaping; bytes that are not UTF-8 become `\xNN`
fn format_string(s: &ByteString, buf: &mut String) {
    buf.push('"');
    match s.to_str() {
        Some(text) => {
            for c in text.chars() {
                match c {
                    '"' => buf.push_str("\\\""),
                    '\\' => buf.push_str("\\\\"),
                    '\n' => buf.push_str("\\n"),
                    '\r' => buf.push_str("\\r"),
                    '\t' => buf.push_str("\\t"),
                    c if c.is_control() => {
                        buf.push_str(&format!("\\u{:04x}", c as u32));
                    }
                    c => buf.push(c),
                }
            }
        }
        None => {
            for b in s.as_bytes() {
                if b.is_ascii_graphic() && *b != b'"' && *b != b'\\' || *b == b' ' {
                    buf.push(*b as char);
                } else {
                    buf.push_str(&format!("\\x{:02x}", b));
                }
            }
        }
    }
    buf.push('"');
}

fn format_table(
    table: &TableRef,
    config: &NotationConfig,
    depth: usize,
    path: &mut Vec<usize>,
    buf: &mut String,
) {
    if path.contains(&table.id()) {
        buf.push_str("<cycle>");
        return;
    }

    let contents = table.borrow();
    if contents.is_empty() {
        buf.push_str("{}");
        return;
    }

    // Sequence part renders positionally, everything else as [key] = value
    let seq_len = contents.len();
    let mut rest: Vec<(&TableKey, &Value)> = contents
        .entries()
        .filter(|(k, _)| {
            !matches!(k, TableKey::Integer(i) if *i >= 1 && (*i as usize) <= seq_len)
        })
        .collect();
    rest.sort_by_key(|(k, _)| key_sort_order(k));

    path.push(table.id());
    let mut items: Vec<String> = Vec::with_capacity(seq_len + rest.len());
    for i in 1..=seq_len {
        let mut item = String::new();
        let value = contents.get(&TableKey::Integer(i as i64)).cloned().unwrap_or_default();
        format_value(&value, config, depth + 1, path, &mut item);
        items.push(item);
    }
    for (key, value) in rest {
        let mut item = format!("[{}] = ", key_to_notation(key));
        format_value(value, config, depth + 1, path, &mut item);
        items.push(item);
    }
    path.pop();

    if config.pretty {
        buf.push_str("{\n");
        for (i, item) in items.iter().enumerate() {
            push_indent(buf, depth + 1, config.indent);
            buf.push_str(item);
            if i + 1 < items.len() {
                buf.push(',');
            }
            buf.push('\n');
        }
        push_indent(buf, depth, config.indent);
        buf.push('}');
    } else {
        buf.push('{');
        buf.push_str(&items.join(", "));
        buf.push('}');
    }
}

/// Deterministic ordering for non-sequence keys: numbers, booleans, strings, handles, tables
fn key_sort_order(key: &TableKey) -> (u8, i64, String) {
    match key {
        TableKey::Integer(i) => (0, *i, String::new()),
        TableKey::Number(bits) => (1, 0, format!("{:020}", bits)),
        TableKey::Boolean(b) => (2, i64::from(*b), String::new()),
        TableKey::String(s) => (3, 0, String::from_utf8_lossy(s.as_bytes()).into_owned()),
        TableKey::Handle(h) => (4, i64::from(h.id()), String::new()),
        TableKey::Table(t) => (5, t.id() as i64, String::new()),
    }
}

fn push_indent(buf: &mut String, depth: usize, indent_size: usize) {
    for _ in 0..(depth * indent_size) {
        buf.push(' ');
    }
}
