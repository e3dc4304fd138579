use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{album, hash_of};
use crate::{ArgumentError, TypeBuilder, Value, data, field, optional_field};

#[test]
fn test_positional_construction_binds_fields() {
	let album = album();
	let a = album
		.construct([Value::from("Everything in Transit"), Value::from(2005)])
		.unwrap();
	assert_eq!(a.get("name"), Some(Value::from("Everything in Transit")));
	assert_eq!(a.get("year"), Some(Value::from(2005)));
}

#[test]
fn test_named_construction_binds_fields() {
	let album = album();
	let a = album
		.construct_with([Value::from("Everything in Transit")], [("year", 2005)])
		.unwrap();
	let b = album
		.construct([Value::from("Everything in Transit"), Value::from(2005)])
		.unwrap();
	assert_eq!(a, b);
}

#[test]
fn test_optional_field_defaults_to_none() {
	let node = data(
		TypeBuilder::new("Node")
			.field("value", field())
			.field("next", optional_field())
			.build(),
	);
	let n = node.construct([1]).unwrap();
	assert_eq!(n.get("next"), Some(Value::None));
	assert_eq!(n.to_string(), "Node(value=1, next=None)");
}

#[rstest]
#[case(vec![Value::from("a"), Value::from(1), Value::from(2)], vec![], "Album() takes 2 positional arguments but 3 were given")]
#[case(vec![], vec![], "Album() missing required arguments: name, year")]
#[case(vec![Value::from("a"), Value::from(1), Value::from(2), Value::from(3)], vec![], "Album() takes 2 positional arguments but 4 were given")]
#[case(vec![Value::from("a")], vec![("genre", Value::from("rock"))], "Album() got an unexpected keyword argument \"genre\"")]
#[case(vec![Value::from("a")], vec![("name", Value::from("b"))], "Album() got multiple values for argument \"name\"")]
fn test_argument_errors(#[case] args: Vec<Value>, #[case] named: Vec<(&str, Value)>, #[case] message: &str) {
	let err = album().construct_with(args, named).unwrap_err();
	assert_eq!(err.to_string(), message);
}

#[test]
fn test_missing_lists_only_required_fields() {
	let node = data(
		TypeBuilder::new("Node")
			.field("value", field())
			.field("next", optional_field())
			.build(),
	);
	let err = node.construct(Vec::<Value>::new()).unwrap_err();
	assert_eq!(
		err,
		ArgumentError::Missing {
			type_name: "Node".into(),
			names: vec!["value".into()],
		}
	);
}

#[test]
fn test_equal_fields_are_equal_and_hash_alike() {
	let album = album();
	let a = album.construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let b = album.construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	assert!(!a.ptr_eq(&b));
	assert_eq!(a, b);
	assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_different_fields_are_not_equal() {
	let album = album();
	let a = album.construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let b = album.construct([Value::from("Blue"), Value::from(1972)]).unwrap();
	assert_ne!(a, b);
}

#[test]
fn test_unrelated_types_are_not_equal() {
	let a = album().construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let b = album().construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	assert_ne!(Value::from(a.clone()), Value::from(b.clone()));
	assert!(!a.structural_eq(&Value::from(b)));
	assert!(!a.structural_eq(&Value::from("Blue")));
	assert_ne!(Value::from(a), Value::from(1971));
}

/// `PartialEq` requires the exact type; `structural_eq` accepts a subtype on
/// the right-hand side only.
#[test]
fn test_subtype_equality_is_one_sided() {
	let album = album();
	let reissue = data(TypeBuilder::new("Reissue").extends(&album).build());
	let original = album.construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let copy = reissue.construct([Value::from("Blue"), Value::from(1971)]).unwrap();

	assert!(original.structural_eq(&Value::from(copy.clone())));
	assert!(!copy.structural_eq(&Value::from(original.clone())));
	assert_ne!(original, copy);
}

#[test]
fn test_repr_lists_fields_in_order() {
	let a = album()
		.construct([Value::from("Everything in Transit"), Value::from(2005)])
		.unwrap();
	let repr = "Album(name='Everything in Transit', year=2005)";
	assert_eq!(a.to_string(), repr);
	assert_eq!(format!("{a:?}"), repr);
}

#[test]
fn test_nested_repr() {
	let album = album();
	let pair = data(
		TypeBuilder::new("Pair")
			.field("first", field())
			.field("second", field())
			.build(),
	);
	let a = album.construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let p = pair.construct([Value::from(a), Value::from(vec![Value::None])]).unwrap();
	assert_eq!(p.to_string(), "Pair(first=Album(name='Blue', year=1971), second=[None])");
}

#[test]
fn test_ancestor_init_runs_before_fields() {
	let base = TypeBuilder::new("Tracked")
		.init(|instance| instance.set("origin", "tracked"))
		.build();
	let point = data(
		TypeBuilder::new("Point")
			.extends(&base)
			.field("x", field())
			.init(|instance| instance.set("origin", "point"))
			.build(),
	);
	let p = point.construct([3]).unwrap();
	assert_eq!(p.get("origin"), Some(Value::from("point")));
	assert_eq!(p.get("x"), Some(Value::from(3)));
	assert_eq!(p.to_string(), "Point(x=3)");

	let leaf = data(TypeBuilder::new("Leaf").extends(&base).field("x", field()).build());
	let l = leaf.construct([3]).unwrap();
	assert_eq!(l.get("origin"), Some(Value::from("tracked")));
}

#[rstest]
#[case(0, 1, "Empty() takes 0 positional arguments but 1 was given")]
#[case(1, 2, "Single() takes 1 positional argument but 2 were given")]
fn test_too_many_message_agrees_in_number(#[case] fields: usize, #[case] given: usize, #[case] message: &str) {
	let name = if fields == 0 { "Empty" } else { "Single" };
	let builder = (0..fields).fold(TypeBuilder::new(name), |b, i| b.field(format!("f{i}"), field()));
	let ty = data(builder.build());
	let err = ty.construct((0..given).map(|i| i as i64)).unwrap_err();
	assert_eq!(err.to_string(), message);
}

#[test]
fn test_plain_type_takes_no_arguments() {
	let plain = TypeBuilder::new("Plain").field("ignored", field()).build();
	assert!(!plain.is_data());
	assert!(plain.field_names().is_empty());
	let p = plain.construct(Vec::<Value>::new()).unwrap();
	assert_eq!(p.to_string(), "Plain()");
	assert!(matches!(plain.construct([1]), Err(ArgumentError::TooMany { .. })));
}

#[test]
fn test_plain_subtype_inherits_synthesized_behavior() {
	let literal = data(TypeBuilder::new("Literal").field("value", field()).build());
	let tagged = TypeBuilder::new("TaggedLiteral").extends(&literal).build();
	assert!(!tagged.is_data());
	assert_eq!(tagged.field_names(), vec!["value"]);

	let a = tagged.construct([1]).unwrap();
	let b = tagged.construct([2]).unwrap();
	let again = tagged.construct_with(Vec::<Value>::new(), [("value", 1)]).unwrap();
	assert_eq!(a.to_string(), "TaggedLiteral(value=1)");
	assert_ne!(a, b);
	assert_eq!(a, again);
	assert_eq!(hash_of(&a), hash_of(&again));
	assert_ne!(a, literal.construct([1]).unwrap());

	let c = crate::copy(&a, [("value", 3)]).unwrap();
	assert_eq!(c.ty(), &tagged);
	assert_eq!(c.to_string(), "TaggedLiteral(value=3)");
}

#[test]
fn test_processing_twice_keeps_layout() {
	let album = album();
	let again = data(album.clone());
	assert_eq!(album, again);
	assert_eq!(again.field_names(), vec!["name", "year"]);
}

#[test]
fn test_mutated_slot_is_observed() {
	let a = album().construct([Value::from("Blue"), Value::from(1971)]).unwrap();
	let alias = a.clone();
	alias.set("year", 1972);
	assert_eq!(a.get("year"), Some(Value::from(1972)));
}

#[test]
fn test_self_referential_instance() {
	let node = data(
		TypeBuilder::new("Node")
			.field("value", field())
			.field("next", optional_field())
			.build(),
	);
	let a = node.construct([1]).unwrap();
	a.set("next", a.clone());
	let b = node.construct([1]).unwrap();
	b.set("next", b.clone());

	assert_eq!(a.to_string(), "Node(value=1, next=...)");
	assert_eq!(format!("{a:?}"), "Node(value=1, next=...)");
	assert_eq!(a, b);
	assert_eq!(hash_of(&a), hash_of(&b));

	let c = node.construct([2]).unwrap();
	c.set("next", c.clone());
	assert_ne!(a, c);
}
