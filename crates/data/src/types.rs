//! Type definitions.
//!
//! A [`TypeDef`] is a cheap, shared handle. Two handles are the same type iff
//! they come from the same [`TypeBuilder::build`] call; names are display-only.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use heck::ToSnakeCase;
use rustc_hash::FxHashMap as HashMap;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::instance::Instance;
use crate::layout::FieldLayout;
use crate::value::Value;

/// Constructor logic contributed by a type to every instance of it or its subtypes.
pub type InitHook = Arc<dyn Fn(&Instance) + Send + Sync>;

/// Hand-written dispatch hook for types that are not synthesized.
pub type AcceptHook = Arc<dyn Fn(&Instance, &dyn Dispatcher, &[Value]) -> Result<Value> + Send + Sync>;

static NEXT_TYPE_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
	fn next() -> Self {
		Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
	}
}

pub(crate) struct TypeInner {
	pub(crate) id: TypeId,
	pub(crate) name: Box<str>,
	pub(crate) handler: Box<str>,
	pub(crate) parent: Option<TypeDef>,
	/// Declared fields, unordered; order comes from the descriptors alone.
	pub(crate) declared: HashMap<Box<str>, FieldDescriptor>,
	pub(crate) init: Option<InitHook>,
	pub(crate) accept: Option<AcceptHook>,
	/// Set once when the type is processed by [`crate::data`].
	pub(crate) layout: OnceLock<Arc<FieldLayout>>,
}

/// Shared handle to a type definition.
#[derive(Clone)]
pub struct TypeDef(pub(crate) Arc<TypeInner>);

impl TypeDef {
	pub fn id(&self) -> TypeId {
		self.0.id
	}

	pub fn name(&self) -> &str {
		&self.0.name
	}

	pub fn parent(&self) -> Option<&TypeDef> {
		self.0.parent.as_ref()
	}

	/// Name of the dispatcher method handling this type, e.g. `visit_add_expression`.
	pub fn handler_name(&self) -> &str {
		&self.0.handler
	}

	/// Iterates this type, then its parent, up to the root.
	pub fn ancestry(&self) -> Ancestry<'_> {
		Ancestry { next: Some(self) }
	}

	/// Returns true if `self` is `other` or descends from it.
	pub fn is_subtype_of(&self, other: &TypeDef) -> bool {
		self.ancestry().any(|t| t == other)
	}

	/// Returns true once the type has been processed by [`crate::data`].
	pub fn is_data(&self) -> bool {
		self.0.layout.get().is_some()
	}

	/// Ordered fields of the nearest synthesized type in the ancestry.
	///
	/// A plain subtype of a value type inherits its parent's constructor,
	/// equality, hash and representation through this lookup.
	pub fn layout(&self) -> Option<&Arc<FieldLayout>> {
		self.ancestry().find_map(|t| t.0.layout.get())
	}

	/// Field names in constructor order; empty when no ancestor is synthesized.
	pub fn field_names(&self) -> Vec<&str> {
		self.layout()
			.map(|l| l.iter().map(|f| f.name()).collect())
			.unwrap_or_default()
	}

	pub(crate) fn declared(&self) -> &HashMap<Box<str>, FieldDescriptor> {
		&self.0.declared
	}

	pub(crate) fn init_hook(&self) -> Option<&InitHook> {
		self.0.init.as_ref()
	}

	pub(crate) fn accept_hook(&self) -> Option<&AcceptHook> {
		self.0.accept.as_ref()
	}
}

impl PartialEq for TypeDef {
	fn eq(&self, other: &Self) -> bool {
		self.0.id == other.0.id
	}
}

impl Eq for TypeDef {}

impl Hash for TypeDef {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.id.hash(state);
	}
}

impl fmt::Debug for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDef")
			.field("id", &self.0.id)
			.field("name", &self.0.name)
			.field("data", &self.is_data())
			.finish()
	}
}

/// Iterator over a type and its ancestors, nearest first.
pub struct Ancestry<'a> {
	next: Option<&'a TypeDef>,
}

impl<'a> Iterator for Ancestry<'a> {
	type Item = &'a TypeDef;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent();
		Some(current)
	}
}

/// Builder for [`TypeDef`].
pub struct TypeBuilder {
	name: Box<str>,
	parent: Option<TypeDef>,
	declared: HashMap<Box<str>, FieldDescriptor>,
	init: Option<InitHook>,
	accept: Option<AcceptHook>,
}

impl TypeBuilder {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			parent: None,
			declared: HashMap::default(),
			init: None,
			accept: None,
		}
	}

	/// Sets the parent type.
	pub fn extends(mut self, parent: &TypeDef) -> Self {
		self.parent = Some(parent.clone());
		self
	}

	/// Binds a field descriptor to `name` on this type.
	///
	/// Redeclaring a name replaces the earlier descriptor.
	pub fn field(mut self, name: impl Into<Box<str>>, descriptor: FieldDescriptor) -> Self {
		self.declared.insert(name.into(), descriptor);
		self
	}

	/// Adds constructor logic run for instances of this type and its subtypes.
	pub fn init(mut self, hook: impl Fn(&Instance) + Send + Sync + 'static) -> Self {
		self.init = Some(Arc::new(hook));
		self
	}

	/// Supplies a dispatch hook for a type that will not be synthesized.
	pub fn accept(
		mut self,
		hook: impl Fn(&Instance, &dyn Dispatcher, &[Value]) -> Result<Value> + Send + Sync + 'static,
	) -> Self {
		self.accept = Some(Arc::new(hook));
		self
	}

	pub fn build(self) -> TypeDef {
		let handler = format!("visit_{}", self.name.to_snake_case()).into_boxed_str();
		TypeDef(Arc::new(TypeInner {
			id: TypeId::next(),
			name: self.name,
			handler,
			parent: self.parent,
			declared: self.declared,
			init: self.init,
			accept: self.accept,
			layout: OnceLock::new(),
		}))
	}
}
