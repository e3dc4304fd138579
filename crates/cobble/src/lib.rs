//! Value types declared by listing their fields once, with visitors whose
//! completeness is checked against the type hierarchy.
//!
//! ```
//! use cobble::{Value, data_type, visitable, TypeBuilder};
//!
//! let expression = visitable(TypeBuilder::new("Expression").build());
//! let literal = data_type! { Literal: expression { value } };
//! let add = data_type! { Add: expression { left, right } };
//!
//! let two = literal.construct([2]).unwrap();
//! let sum = add.construct_with([Value::from(two.clone())], [("right", two)]).unwrap();
//! assert_eq!(sum.to_string(), "Add(left=Literal(value=2), right=Literal(value=2))");
//! ```

mod macros;

pub use cobble_data::{
	AcceptHook, Ancestry, ArgumentError, CompletenessError, ConfigError, DeclarationOrder, DispatchError, Dispatcher,
	Error, Field, FieldDefault, FieldDescriptor, FieldLayout, HIERARCHY, HierarchyRegistry, InitHook, Instance, Result,
	TypeBuilder, TypeDef, TypeId, Value, copy, data, field, field_with_default, optional_field, synthesize, visitable,
};
#[cfg(feature = "visitor")]
pub use cobble_visitor::{
	Handler, Implementation, ImplementationBuilder, Visitor, VisitorOptions, VisitorType, visitor, visitor_in, visitor_with,
};
