//! Reference stack VM
//!
//! `Vm` is an in-process implementation of `ScriptRuntime`: a growable
//! array of `Value` slots plus the handle table used to resolve host
//! identities. It follows the same stack discipline as the embedded
//! runtime it stands in for, so anything that balances here balances there.
//!
//! The stack grows upward; slot 1 is the bottom, `depth()` is the top.

use crate::config::StackConfig;
use crate::error::{StackError, fault};
use crate::geometry::{Matrix, Vector2, Vector3, Vector4};
use crate::handle::{HandleTable, ObjectIdentity};
use crate::runtime::ScriptRuntime;
use crate::table::{Table, TableKey, TableRef};
use crate::value::{ByteString, Value};

/// Reference scripting-runtime stack
///
/// Tables are `Rc`-shared, so a `Vm` stays on the thread that created it.
#[derive(Debug)]
pub struct Vm {
    slots: Vec<Value>,
    max_depth: usize,
    handles: HandleTable,
}

impl Default for Vm {
    fn default() -> Self {
        Self::with_config(&StackConfig::default())
    }
}

impl Vm {
    /// Create a stack configured from the environment
    pub fn new() -> Self {
        Self::with_config(&StackConfig::from_env())
    }

    pub fn with_config(config: &StackConfig) -> Self {
        Vm {
            slots: Vec::with_capacity(config.reserved_slots()),
            max_depth: config.max_depth,
            handles: HandleTable::new(),
        }
    }

    /// Number of values on the stack
    #[inline]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut HandleTable {
        &mut self.handles
    }

    /// Value at `index` (shared for tables)
    pub fn get(&self, index: i32) -> Result<Value, StackError> {
        let slot = self.absolute_index(index)?;
        Ok(self.slots[slot].clone())
    }

    /// Remove and return the top value
    pub fn pop(&mut self) -> Result<Value, StackError> {
        self.slots.pop().ok_or(StackError::Underflow {
            needed: 1,
            depth: 0,
        })
    }

    /// Drop values above `depth`
    pub fn truncate(&mut self, depth: usize) {
        self.slots.truncate(depth);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Values from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.slots.iter()
    }

    /// Push a value, failing instead of faulting on overflow
    pub fn try_push(&mut self, value: Value) -> Result<(), StackError> {
        if self.slots.len() >= self.max_depth {
            return Err(StackError::Overflow {
                max_depth: self.max_depth,
            });
        }
        tracing::trace!(depth = self.slots.len() + 1, kind = value.type_name(), "push");
        self.slots.push(value);
        Ok(())
    }

    /// `raw_set_index` that reports misuse instead of faulting
    pub fn try_raw_set_index(&mut self, table_index: i32, n: i64) -> Result<(), StackError> {
        self.require(1)?;
        let table = self.table_at(table_index)?;
        let value = self.pop()?;
        tracing::trace!(n, kind = value.type_name(), "raw_set_index");
        table.borrow_mut().set(TableKey::Integer(n), value);
        Ok(())
    }

    /// `set_table` that reports misuse instead of faulting
    ///
    /// Nothing is popped unless the store can succeed.
    pub fn try_set_table(&mut self, table_index: i32) -> Result<(), StackError> {
        self.require(2)?;
        let table = self.table_at(table_index)?;
        let key = TableKey::from_value(&self.slots[self.slots.len() - 2])?;
        let value = self.pop()?;
        self.pop()?;
        tracing::trace!(?key, kind = value.type_name(), "set_table");
        table.borrow_mut().set(key, value);
        Ok(())
    }

    /// Render every slot, bottom to top, in table-constructor notation
    pub fn dump(&self) -> String {
        use crate::notation::{NotationConfig, value_to_notation};

        let config = NotationConfig::compact();
        let rendered: Vec<String> = self
            .slots
            .iter()
            .map(|v| value_to_notation(v, &config))
            .collect();
        format!("stack: {}", rendered.join(" "))
    }

    /// Serializable copy of the whole stack
    pub fn snapshot(&self) -> Result<crate::snapshot::StackSnapshot, crate::snapshot::SnapshotError> {
        crate::snapshot::StackSnapshot::capture(self.slots.iter())
    }

    /// Convert a runtime index into a 0-based slot position
    fn absolute_index(&self, index: i32) -> Result<usize, StackError> {
        let depth = self.slots.len();
        let out_of_range = StackError::IndexOutOfRange { index, depth };
        if index > 0 {
            let slot = index as usize - 1;
            if slot < depth { Ok(slot) } else { Err(out_of_range) }
        } else if index < 0 {
            let back = index.unsigned_abs() as usize;
            if back <= depth {
                Ok(depth - back)
            } else {
                Err(out_of_range)
            }
        } else {
            Err(out_of_range)
        }
    }

    fn table_at(&self, index: i32) -> Result<TableRef, StackError> {
        let slot = self.absolute_index(index)?;
        match &self.slots[slot] {
            Value::Table(t) => Ok(t.clone()),
            other => Err(StackError::NotATable {
                index,
                found: other.type_name(),
            }),
        }
    }

    fn require(&self, needed: usize) -> Result<(), StackError> {
        let depth = self.slots.len();
        if depth < needed {
            Err(StackError::Underflow { needed, depth })
        } else {
            Ok(())
        }
    }

    fn push_or_fault(&mut self, op: &str, value: Value) {
        if let Err(e) = self.try_push(value) {
            fault(op, e);
        }
    }
}

impl ScriptRuntime for Vm {
    fn top(&self) -> usize {
        self.depth()
    }

    fn push_nil(&mut self) {
        self.push_or_fault("push_nil", Value::Nil);
    }

    fn push_boolean(&mut self, value: bool) {
        self.push_or_fault("push_boolean", Value::Boolean(value));
    }

    fn push_number(&mut self, value: f64) {
        self.push_or_fault("push_number", Value::Number(value));
    }

    fn push_lstring(&mut self, bytes: &[u8]) {
        self.push_or_fault("push_lstring", Value::String(ByteString::copy_from(bytes)));
    }

    fn push_vector2(&mut self, value: Vector2) {
        self.push_or_fault("push_vector2", Value::Vector2(value));
    }

    fn push_vector3(&mut self, value: Vector3) {
        self.push_or_fault("push_vector3", Value::Vector3(value));
    }

    fn push_vector4(&mut self, value: Vector4) {
        self.push_or_fault("push_vector4", Value::Vector4(value));
    }

    fn push_matrix(&mut self, value: Matrix) {
        self.push_or_fault("push_matrix", Value::Matrix(value));
    }

    fn push_handle(&mut self, identity: ObjectIdentity) {
        let value = match self.handles.handle_of(identity) {
            Some(handle) => Value::Handle(handle),
            None => {
                if !identity.is_null() {
                    tracing::warn!(addr = identity.addr(), "no handle registered, pushing nil");
                }
                Value::Nil
            }
        };
        self.push_or_fault("push_handle", value);
    }

    fn create_table(&mut self, narr: usize, nrec: usize) {
        let table = TableRef::new(Table::with_capacity(narr, nrec));
        self.push_or_fault("create_table", Value::Table(table));
    }

    fn raw_set_index(&mut self, table_index: i32, n: i64) {
        if let Err(e) = self.try_raw_set_index(table_index, n) {
            fault("raw_set_index", e);
        }
    }

    fn set_table(&mut self, table_index: i32) {
        if let Err(e) = self.try_set_table(table_index) {
            fault("set_table", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_vm(max_depth: usize) -> Vm {
        Vm::with_config(&StackConfig {
            initial_capacity: 4,
            max_depth,
        })
    }

    #[test]
    fn test_push_and_index() {
        let mut vm = Vm::default();
        vm.push_number(1.0);
        vm.push_boolean(true);
        vm.push_string("three");

        assert_eq!(vm.depth(), 3);
        assert_eq!(vm.get(1).unwrap(), Value::Number(1.0));
        assert_eq!(vm.get(-1).unwrap(), Value::from("three"));
        assert_eq!(vm.get(-3).unwrap(), Value::Number(1.0));
        assert!(vm.get(0).is_err());
        assert!(vm.get(4).is_err());
        assert!(vm.get(-4).is_err());
    }

    #[test]
    fn test_lstring_copies_bytes() {
        let mut vm = Vm::default();
        {
            let buffer = vec![b'a', 0, b'b'];
            vm.push_lstring(&buffer);
        }
        match vm.get(-1).unwrap() {
            Value::String(s) => assert_eq!(s.as_bytes(), b"a\0b"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_set_index_consumes_value() {
        let mut vm = Vm::default();
        vm.create_table(2, 0);
        vm.push_number(10.0);
        vm.raw_set_index(-2, 1);
        vm.push_number(20.0);
        vm.raw_set_index(-2, 2);

        assert_eq!(vm.depth(), 1);
        let table = vm.get(-1).unwrap();
        let table = table.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_index(1), Value::Number(10.0));
        assert_eq!(table.get_index(2), Value::Number(20.0));
    }

    #[test]
    fn test_set_table_consumes_key_and_value() {
        let mut vm = Vm::default();
        vm.new_table();
        vm.push_string("a");
        vm.push_number(1.0);
        vm.set_table(-3);

        assert_eq!(vm.depth(), 1);
        let table = vm.get(1).unwrap();
        assert_eq!(table.as_table().unwrap().get(&Value::from("a")), Value::Number(1.0));
    }

    #[test]
    fn test_set_table_with_absolute_index() {
        let mut vm = Vm::default();
        vm.new_table();
        vm.push_number(1.0);
        vm.push_boolean(false);
        vm.set_table(1);
        let table = vm.pop().unwrap();
        assert_eq!(table.as_table().unwrap().get_index(1), Value::Boolean(false));
    }

    #[test]
    fn test_try_set_table_nil_key_leaves_stack_untouched() {
        let mut vm = Vm::default();
        vm.new_table();
        vm.push_nil();
        vm.push_number(1.0);
        assert_eq!(vm.try_set_table(-3), Err(StackError::InvalidKey("nil")));
        assert_eq!(vm.depth(), 3);
    }

    #[test]
    fn test_try_raw_set_index_requires_table() {
        let mut vm = Vm::default();
        vm.push_number(1.0);
        vm.push_number(2.0);
        assert_eq!(
            vm.try_raw_set_index(-2, 1),
            Err(StackError::NotATable {
                index: -2,
                found: "number"
            })
        );
        assert_eq!(vm.depth(), 2);
    }

    #[test]
    #[should_panic(expected = "set_table: table index is NaN")]
    fn test_set_table_nan_key_faults() {
        let mut vm = Vm::default();
        vm.new_table();
        vm.push_number(f64::NAN);
        vm.push_number(1.0);
        vm.set_table(-3);
    }

    #[test]
    #[should_panic(expected = "push_number: stack overflow (max depth 2)")]
    fn test_overflow_faults() {
        let mut vm = small_vm(2);
        vm.push_number(1.0);
        vm.push_number(2.0);
        vm.push_number(3.0);
    }

    #[test]
    fn test_try_push_overflow() {
        let mut vm = small_vm(1);
        assert!(vm.try_push(Value::Nil).is_ok());
        assert_eq!(
            vm.try_push(Value::Nil),
            Err(StackError::Overflow { max_depth: 1 })
        );
    }

    #[test]
    fn test_push_handle_registered_and_unknown() {
        let entity = 17u32;
        let stranger = 18u32;
        let mut vm = Vm::default();
        let handle = vm.handles_mut().register(ObjectIdentity::of(&entity));

        vm.push_handle(ObjectIdentity::of(&entity));
        vm.push_handle(ObjectIdentity::of(&stranger));

        assert_eq!(vm.get(-2).unwrap(), Value::Handle(handle));
        assert_eq!(vm.get(-1).unwrap(), Value::Nil);
    }

    #[test]
    fn test_pop_empty() {
        let mut vm = Vm::default();
        assert!(matches!(vm.pop(), Err(StackError::Underflow { .. })));
    }

    #[test]
    fn test_truncate_and_clear() {
        let mut vm = Vm::default();
        vm.push_number(1.0);
        vm.push_number(2.0);
        vm.push_number(3.0);
        vm.truncate(1);
        assert_eq!(vm.depth(), 1);
        vm.clear();
        assert!(vm.is_empty());
    }

    #[test]
    fn test_dump() {
        let mut vm = Vm::default();
        vm.push_number(42.0);
        vm.push_string("hi");
        vm.push_nil();
        assert_eq!(vm.dump(), "stack: 42 \"hi\" nil");
    }
}
