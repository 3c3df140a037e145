//! Generic argument path
//!
//! An [`Argument`] carries its type as a run-time tag, and an empty one
//! pushes nothing at all. Through the marshaling entry point every push
//! must add exactly one slot, so an empty `Argument` is refused outright:
//! pushing nothing would shift every later positional value of the same
//! call by one.
//!
//! Callers that may hold an empty argument check `argument_type()` first,
//! or wrap the argument in `Option` and map the empty case to `None`.

use crate::Push;
use scriptpush_core::{Argument, ArgumentType, Arguments, ScriptRuntime};

impl Push for Argument {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        if self.argument_type() == ArgumentType::None {
            tracing::error!(depth = rt.top(), "refusing to push an empty Argument");
            panic!("push: Argument holds no value; it would leave the stack one slot short");
        }
        self.push_self(rt);
    }
}

impl Push for Arguments {
    fn push<R: ScriptRuntime + ?Sized>(&self, rt: &mut R) {
        self.push_as_table(rt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push;
    use scriptpush_core::{Value, Vm};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_tagged_arguments_push_one_slot() {
        let mut vm = Vm::default();
        push(&mut vm, &Argument::Nil);
        push(&mut vm, &Argument::from(4.0));
        push(&mut vm, &Argument::from("tag"));
        push(&mut vm, &Argument::from(Arguments::new().with(1).with(2)));
        assert_eq!(vm.depth(), 4);
        assert_eq!(vm.get(3).unwrap(), Value::from("tag"));
        let list = vm.get(4).unwrap();
        assert_eq!(list.as_table().unwrap().len(), 2);
    }

    #[test]
    #[should_panic(expected = "Argument holds no value")]
    fn test_empty_argument_is_fatal() {
        let mut vm = Vm::default();
        push(&mut vm, &Argument::None);
    }

    #[test]
    fn test_empty_argument_produces_no_slot() {
        let mut vm = Vm::default();
        push(&mut vm, &1);
        let result = catch_unwind(AssertUnwindSafe(|| {
            push(&mut vm, &Argument::None);
        }));
        assert!(result.is_err());
        assert_eq!(vm.depth(), 1);
    }

    #[test]
    fn test_empty_argument_inside_container_is_fatal() {
        let args = vec![Argument::from(true), Argument::None];
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut vm = Vm::default();
            push(&mut vm, &args);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_arguments_push_as_sequence() {
        let mut vm = Vm::default();
        push(&mut vm, &Arguments::new().with("x").with(Argument::None).with(false));
        let table = vm.get(-1).unwrap();
        let table = table.as_table().unwrap();
        assert_eq!(table.get_index(1), Value::from("x"));
        assert_eq!(table.get_index(2), Value::Nil);
        assert_eq!(table.get_index(3), Value::Boolean(false));
    }
}
