//! Visitors over visitable value-type hierarchies.
//!
//! [`visitor`] reads the hierarchy registry and produces a [`VisitorType`]
//! requiring one handler per synthesized descendant of the root, named
//! `visit_<snake_case type name>`. [`VisitorType::extend`] collects handlers
//! into an [`Implementation`]; [`Implementation::instantiate`] refuses to
//! produce a [`Visitor`] while any required handler is missing.
//!
//! ```
//! use cobble_data::{TypeBuilder, Value, data, field, visitable};
//! use cobble_visitor::visitor;
//!
//! let shape = visitable(TypeBuilder::new("Shape").build());
//! let square = data(TypeBuilder::new("Square").extends(&shape).field("side", field()).build());
//!
//! let area = visitor(&shape)
//! 	.unwrap()
//! 	.extend("Area")
//! 	.handler("visit_square", |_, sq, _| {
//! 		let side = sq.get("side").and_then(|v| v.as_int()).unwrap_or(0);
//! 		Ok(Value::from(side * side))
//! 	})
//! 	.build()
//! 	.instantiate()
//! 	.unwrap();
//!
//! let s = square.construct([3]).unwrap();
//! assert_eq!(area.visit(&Value::from(s), &[]).unwrap(), Value::from(9));
//! ```

mod factory;
mod implementation;

pub use factory::{VisitorOptions, VisitorType, visitor, visitor_in, visitor_with};
pub use implementation::{Handler, Implementation, ImplementationBuilder, Visitor};
