//! Stack-level behavior of the marshaling entry point
//!
//! These tests drive `push` against the reference `Vm` and inspect the
//! resulting stack the way a script would see it.

use scriptpush::{
    Argument, Arguments, Nil, OneOf2, ScriptEntity, ScriptRuntime, Value, Vector3, Vm, push,
    script_identity,
};
use std::collections::{BTreeMap, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sequence(value: &Value) -> Vec<Value> {
    let table = value.as_table().expect("expected a table");
    (1..=table.len() as i64).map(|i| table.get_index(i)).collect()
}

/// Push `value` on top of a marker slot and check exactly one slot was added
fn push_one<T: scriptpush::Push + ?Sized>(value: &T) -> Value {
    let mut vm = Vm::default();
    vm.push_string("marker");
    push(&mut vm, value);
    assert_eq!(vm.depth(), 2, "push must add exactly one slot");
    assert_eq!(vm.get(1).unwrap(), Value::from("marker"));
    vm.get(2).unwrap()
}

#[test]
fn test_scenario_integer() {
    init_tracing();
    assert_eq!(push_one(&42), Value::Number(42.0));
}

#[test]
fn test_scenario_sequence_of_int() {
    init_tracing();
    let value = push_one(&vec![10, 20, 30]);
    assert_eq!(value.as_table().unwrap().len(), 3);
    assert_eq!(
        sequence(&value),
        vec![
            Value::Number(10.0),
            Value::Number(20.0),
            Value::Number(30.0)
        ]
    );
}

#[test]
fn test_scenario_empty_optional_text() {
    init_tracing();
    let missing: Option<String> = None;
    assert_eq!(push_one(&missing), Value::Nil);
}

#[test]
fn test_scenario_tuple() {
    init_tracing();
    let value = push_one(&(1.5, 7, true));
    assert_eq!(
        sequence(&value),
        vec![Value::Number(1.5), Value::Number(7.0), Value::Boolean(true)]
    );
}

#[test]
fn test_scenario_map_of_text_to_int() {
    init_tracing();
    let mut map = HashMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);
    let value = push_one(&map);

    let mut pairs = value.as_table().unwrap().pairs();
    pairs.sort_by(|x, y| x.0.as_str().cmp(&y.0.as_str()));
    assert_eq!(
        pairs,
        vec![
            (Value::from("a"), Value::Number(1.0)),
            (Value::from("b"), Value::Number(2.0)),
        ]
    );
}

#[test]
fn test_scenario_empty_argument_aborts() {
    init_tracing();
    let mut vm = Vm::default();
    let result = catch_unwind(AssertUnwindSafe(|| push(&mut vm, &Argument::None)));
    assert!(result.is_err());
    assert_eq!(vm.depth(), 0);
}

#[test]
fn test_index_translation() {
    let letters: Vec<String> = ["w", "x", "y", "z"].iter().map(|s| s.to_string()).collect();
    let array = ['w' as u32, 'x' as u32, 'y' as u32, 'z' as u32];

    let from_vec = push_one(&letters);
    let from_array = push_one(&array);
    for (k, letter) in letters.iter().enumerate() {
        let index = k as i64 + 1;
        assert_eq!(
            from_vec.as_table().unwrap().get_index(index),
            Value::from(letter.as_str())
        );
        assert_eq!(
            from_array.as_table().unwrap().get_index(index),
            Value::Number(f64::from(array[k]))
        );
    }
}

#[test]
fn test_empty_sequence_is_empty_table() {
    let value = push_one(&Vec::<Vec<i32>>::new());
    let table = value.as_table().expect("empty sequence should push a table");
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
}

#[test]
fn test_optional_matches_direct_push() {
    let direct = push_one(&vec![1, 2]);
    let wrapped = push_one(&Some(vec![1, 2]));
    assert_eq!(sequence(&direct), sequence(&wrapped));

    assert_eq!(push_one(&Some("text")), push_one("text"));
    assert_eq!(push_one(&None::<i32>), push_one(&Nil));
}

#[test]
fn test_tuple_arity_and_elements() {
    let tuple = ("name", Vector3::new(1.0, 2.0, 3.0), Some(false));
    let value = push_one(&tuple);
    let elements = sequence(&value);
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0], push_one(&tuple.0));
    assert_eq!(elements[1], push_one(&tuple.1));
    assert_eq!(elements[2], push_one(&tuple.2));
}

#[test]
fn test_deep_nesting_is_balanced() {
    let mut leaf = BTreeMap::new();
    leaf.insert(1u8, (OneOf2::<&str, f64>::A("one"), [Some(1), None, Some(3)]));
    let value = vec![Some(vec![leaf.clone(), leaf]), None, Some(Vec::new())];

    let mut vm = Vm::default();
    for depth in 0..10 {
        assert_eq!(vm.top(), depth);
        push(&mut vm, &value);
    }
    assert_eq!(vm.depth(), 10);
}

#[test]
fn test_arguments_and_entities_together() {
    struct Player {
        _slot: u8,
    }
    impl ScriptEntity for Player {}

    let player = Rc::new(Player { _slot: 3 });
    let mut vm = Vm::default();
    let handle = vm.handles_mut().register(script_identity(&*player));

    let args = Arguments::new()
        .with(Argument::Handle(script_identity(&*player)))
        .with("joined");
    push(&mut vm, &(player.clone(), args));

    let value = vm.get(-1).unwrap();
    let outer = sequence(&value);
    assert_eq!(outer[0], Value::Handle(handle));
    assert_eq!(
        sequence(&outer[1]),
        vec![Value::Handle(handle), Value::from("joined")]
    );
}

#[test]
fn test_dump_renders_pushed_values() {
    let mut vm = Vm::default();
    push(&mut vm, &(1, "two"));
    push(&mut vm, &Some(3.5));
    assert_eq!(vm.dump(), "stack: {1, \"two\"} 3.5");
}
