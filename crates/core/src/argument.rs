//! Generic argument wrappers
//!
//! `Argument` is a dynamically typed value the host builds without knowing
//! a static type, for example when forwarding event parameters. An
//! `Argument` can be empty (`ArgumentType::None`): it holds nothing, and
//! pushing it adds no slot. Callers that need exactly one slot must check
//! for that case first.

use crate::handle::ObjectIdentity;
use crate::runtime::ScriptRuntime;

/// Type tag of an `Argument`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// Holds nothing; pushes nothing
    None,
    Nil,
    Boolean,
    Number,
    String,
    Table,
    Handle,
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArgumentType::None => "none",
            ArgumentType::Nil => "nil",
            ArgumentType::Boolean => "boolean",
            ArgumentType::Number => "number",
            ArgumentType::String => "string",
            ArgumentType::Table => "table",
            ArgumentType::Handle => "handle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Argument {
    #[default]
    None,
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    Table(Arguments),
    Handle(ObjectIdentity),
}

impl Argument {
    pub fn argument_type(&self) -> ArgumentType {
        match self {
            Argument::None => ArgumentType::None,
            Argument::Nil => ArgumentType::Nil,
            Argument::Boolean(_) => ArgumentType::Boolean,
            Argument::Number(_) => ArgumentType::Number,
            Argument::String(_) => ArgumentType::String,
            Argument::Table(_) => ArgumentType::Table,
            Argument::Handle(_) => ArgumentType::Handle,
        }
    }

    /// Push the held value; an empty argument pushes nothing
    pub fn push_self<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        match self {
            Argument::None => {}
            Argument::Nil => rt.push_nil(),
            Argument::Boolean(b) => rt.push_boolean(*b),
            Argument::Number(n) => rt.push_number(*n),
            Argument::String(s) => rt.push_string(s),
            Argument::Table(args) => args.push_as_table(rt),
            Argument::Handle(identity) => rt.push_handle(*identity),
        }
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Boolean(b)
    }
}

impl From<f64> for Argument {
    fn from(n: f64) -> Self {
        Argument::Number(n)
    }
}

impl From<i32> for Argument {
    fn from(n: i32) -> Self {
        Argument::Number(f64::from(n))
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::String(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::String(s)
    }
}

impl From<Arguments> for Argument {
    fn from(args: Arguments) -> Self {
        Argument::Table(args)
    }
}

impl From<ObjectIdentity> for Argument {
    fn from(identity: ObjectIdentity) -> Self {
        Argument::Handle(identity)
    }
}

/// Ordered argument list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: impl Into<Argument>) {
        self.0.push(arg.into());
    }

    /// Builder form of `push`
    pub fn with(mut self, arg: impl Into<Argument>) -> Self {
        self.push(arg);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Argument> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    /// Push the list as one sequence table, element `i` at key `i + 1`
    ///
    /// Empty arguments are stored as nil so every position still consumes
    /// exactly the slot pushed for it.
    pub fn push_as_table<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        rt.create_table(self.0.len(), 0);
        for (i, arg) in self.0.iter().enumerate() {
            match arg {
                Argument::None => rt.push_nil(),
                other => other.push_self(rt),
            }
            rt.raw_set_index(-2, i as i64 + 1);
        }
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Arguments(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Vm;
    use crate::value::Value;

    #[test]
    fn test_argument_types() {
        assert_eq!(Argument::None.argument_type(), ArgumentType::None);
        assert_eq!(Argument::from(true).argument_type(), ArgumentType::Boolean);
        assert_eq!(Argument::from(3).argument_type(), ArgumentType::Number);
        assert_eq!(Argument::from("s").argument_type(), ArgumentType::String);
        assert_eq!(
            Argument::from(Arguments::new()).argument_type(),
            ArgumentType::Table
        );
        assert_eq!(ArgumentType::Handle.to_string(), "handle");
    }

    #[test]
    fn test_push_self_scalars() {
        let mut vm = Vm::default();
        Argument::Nil.push_self(&mut vm);
        Argument::from(2.5).push_self(&mut vm);
        Argument::from("x").push_self(&mut vm);
        assert_eq!(vm.depth(), 3);
        assert_eq!(vm.get(-1).unwrap(), Value::from("x"));
        assert_eq!(vm.get(-2).unwrap(), Value::Number(2.5));
    }

    #[test]
    fn test_empty_argument_pushes_nothing() {
        let mut vm = Vm::default();
        Argument::None.push_self(&mut vm);
        assert!(vm.is_empty());
    }

    #[test]
    fn test_push_as_table() {
        let args = Arguments::new()
            .with(1)
            .with(Argument::None)
            .with("three")
            .with(Arguments::new().with(true));
        let mut vm = Vm::default();
        args.push_as_table(&mut vm);

        assert_eq!(vm.depth(), 1);
        let value = vm.get(-1).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get_index(1), Value::Number(1.0));
        assert_eq!(table.get_index(2), Value::Nil);
        assert_eq!(table.get_index(3), Value::from("three"));
        let nested = table.get_index(4);
        assert_eq!(nested.as_table().unwrap().get_index(1), Value::Boolean(true));
    }

    #[test]
    fn test_collect_and_iterate() {
        let args: Arguments = vec![Argument::from(1), Argument::Nil].into_iter().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args.iter().count(), 2);
        assert_eq!(args.get(1), Some(&Argument::Nil));
        assert_eq!((&args).into_iter().next(), Some(&Argument::from(1)));
    }
}
