use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{ConfigError, FieldDefault, TypeBuilder, Value, data, field, field_with_default, optional_field};

#[test]
fn test_declaration_order_is_monotonic() {
	let first = field();
	let second = optional_field();
	let third = field();
	assert!(first.order() < second.order());
	assert!(second.order() < third.order());
}

#[test]
fn test_non_none_default_is_rejected_at_declaration() {
	let err = field_with_default(Value::from(1)).unwrap_err();
	assert_eq!(err, ConfigError::InvalidDefault);
	assert_eq!(err.to_string(), "default value must be None");

	assert!(field_with_default(Value::from("")).is_err());
	assert!(field_with_default(Value::from(false)).is_err());
}

#[test]
fn test_none_default_makes_field_optional() {
	let descriptor = field_with_default(Value::None).unwrap();
	assert!(descriptor.is_optional());
	assert_eq!(descriptor.default(), Some(FieldDefault::None));
	assert!(!field().is_optional());
}

#[test]
fn test_layout_follows_declaration_not_insertion() {
	let zebra = field();
	let apple = field();
	let mango = field();
	let ty = data(
		TypeBuilder::new("Fruit")
			.field("mango", mango)
			.field("apple", apple)
			.field("zebra", zebra)
			.build(),
	);
	assert_eq!(ty.field_names(), vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_inherited_fields_keep_their_key() {
	let base = TypeBuilder::new("Base").field("a", field()).build();
	let sub = data(TypeBuilder::new("Sub").extends(&base).field("b", field()).build());
	assert_eq!(sub.field_names(), vec!["a", "b"]);
}

#[test]
fn test_redeclared_field_takes_the_subtype_key() {
	let base = TypeBuilder::new("Base").field("a", field()).build();
	let sub = data(
		TypeBuilder::new("Sub")
			.extends(&base)
			.field("b", field())
			.field("a", field())
			.build(),
	);
	assert_eq!(sub.field_names(), vec!["b", "a"]);
}

fn arb_insertion_order() -> impl Strategy<Value = Vec<usize>> {
	(1usize..12).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
	/// Constructor order equals declaration order for any insertion order.
	#[test]
	fn prop_constructor_order_is_declaration_order(order in arb_insertion_order()) {
		let descriptors: Vec<_> = (0..order.len()).map(|_| field()).collect();
		let builder = order.iter().fold(TypeBuilder::new("Shuffled"), |b, &i| {
			b.field(format!("f{i}"), descriptors[i])
		});
		let ty = data(builder.build());

		let expected: Vec<String> = (0..order.len()).map(|i| format!("f{i}")).collect();
		prop_assert_eq!(ty.field_names(), expected.iter().map(String::as_str).collect::<Vec<_>>());

		let args: Vec<Value> = (0..order.len()).map(|i| Value::from(i as i64)).collect();
		let instance = ty.construct(args).unwrap();
		for i in 0..order.len() {
			prop_assert_eq!(instance.get(&format!("f{i}")), Some(Value::from(i as i64)));
		}
	}
}
