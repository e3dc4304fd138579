//! Value types declared by listing their fields once.
//!
//! A type built with [`TypeBuilder`] and processed by [`data`] gets, from its
//! ordered field list:
//!
//! - a constructor ([`TypeDef::construct`], [`TypeDef::construct_with`])
//! - structural equality and hashing on [`Instance`]
//! - the representation `Name(field=repr(value), ...)` via `Display`/`Debug`
//! - a dispatch hook ([`Instance::accept`]) for double dispatch
//!
//! [`copy`] derives a new instance with some fields overridden. Types marked
//! [`visitable`] collect their synthesized descendants in the
//! [`HierarchyRegistry`], which the visitor crate reads to build dispatchers.
//!
//! # Example
//!
//! ```
//! use cobble_data::{TypeBuilder, Value, data, field};
//!
//! let album = data(
//! 	TypeBuilder::new("Album")
//! 		.field("name", field())
//! 		.field("year", field())
//! 		.build(),
//! );
//! let a = album.construct([Value::from("Everything in Transit"), Value::from(2005)]).unwrap();
//! assert_eq!(a.to_string(), "Album(name='Everything in Transit', year=2005)");
//! ```

mod copy;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod hierarchy;
mod instance;
pub mod layout;
mod synth;
pub mod types;
mod value;

pub use copy::copy;
pub use dispatch::Dispatcher;
pub use error::{ArgumentError, CompletenessError, ConfigError, DispatchError, Error, Result};
pub use field::{DeclarationOrder, FieldDefault, FieldDescriptor, field, field_with_default, optional_field};
pub use hierarchy::{HIERARCHY, HierarchyRegistry, visitable};
pub use instance::Instance;
pub use layout::{Field, FieldLayout};
pub use synth::{data, synthesize};
pub use types::{AcceptHook, Ancestry, InitHook, TypeBuilder, TypeDef, TypeId};
pub use value::Value;

#[cfg(test)]
mod tests;
