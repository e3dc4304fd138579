//! Instances of value types and their synthesized structural behavior.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, Result};
use crate::types::TypeDef;
use crate::value::Value;

struct InstanceInner {
	ty: TypeDef,
	slots: RwLock<HashMap<Box<str>, Value>>,
}

/// Shared handle to an instance.
///
/// Cloning the handle shares the slots; use [`crate::copy`] for an independent
/// value. Slots are plain mutable storage, but equality and hashing assume
/// field values do not change once an instance has been hashed.
#[derive(Clone)]
pub struct Instance(Arc<InstanceInner>);

impl Instance {
	pub(crate) fn empty(ty: &TypeDef) -> Self {
		Self(Arc::new(InstanceInner {
			ty: ty.clone(),
			slots: RwLock::new(HashMap::default()),
		}))
	}

	pub fn ty(&self) -> &TypeDef {
		&self.0.ty
	}

	/// Reads an attribute, whether a declared field or ancestor-initialized state.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.0.slots.read().get(name).cloned()
	}

	pub fn set(&self, name: impl Into<Box<str>>, value: impl Into<Value>) {
		self.0.slots.write().insert(name.into(), value.into());
	}

	/// Returns true if both handles refer to the same instance.
	pub fn ptr_eq(&self, other: &Instance) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as usize
	}

	/// Field values in declaration order.
	///
	/// Values are cloned out so no lock is held while callers recurse into
	/// nested instances.
	pub fn fields(&self) -> Vec<(Box<str>, Value)> {
		let Some(layout) = self.ty().layout() else {
			return Vec::new();
		};
		let slots = self.0.slots.read();
		layout
			.iter()
			.map(|f| {
				let value = slots.get(f.name()).cloned().unwrap_or_default();
				(Box::from(f.name()), value)
			})
			.collect()
	}

	fn field_values(&self) -> Vec<Value> {
		self.fields().into_iter().map(|(_, v)| v).collect()
	}

	/// Equality with one-sided ancestry.
	///
	/// True when `other` is an instance of this instance's type or of a subtype,
	/// and every field of this instance's type is equal pairwise. The relation
	/// is not symmetric: a supertype instance on the left may equal a subtype
	/// instance on the right while the reverse comparison is false.
	pub fn structural_eq(&self, other: &Value) -> bool {
		let Value::Instance(other) = other else {
			return false;
		};
		if !other.ty().is_subtype_of(self.ty()) {
			return false;
		}
		if self.ptr_eq(other) {
			return true;
		}
		let theirs = other.0.slots.read().clone();
		self.fields()
			.iter()
			.all(|(name, mine)| theirs.get(name).unwrap_or(&Value::None) == mine)
	}

	/// Dispatch hook: routes this instance to the handler named after its type.
	///
	/// The hook is the one of the nearest type in the ancestry that has one:
	/// a synthesized type dispatches to its own handler name, a plain type may
	/// supply a hand-written hook.
	pub fn accept(&self, dispatcher: &dyn Dispatcher, extra: &[Value]) -> Result<Value> {
		for ty in self.ty().ancestry() {
			if let Some(hook) = ty.accept_hook() {
				return hook(self, dispatcher, extra);
			}
			if ty.is_data() {
				return dispatcher.dispatch(ty.handler_name(), ty, self, extra);
			}
		}
		Err(DispatchError::NotVisitable { repr: self.to_string() }.into())
	}
}

/// Structural walks over an instance currently in progress on this thread.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Walk {
	Repr,
	Hash,
	Eq(usize),
}

thread_local! {
	static IN_PROGRESS: RefCell<HashSet<(usize, Walk)>> = RefCell::new(HashSet::default());
}

/// Marks a walk as in progress until dropped.
///
/// `enter` returns `None` when the same walk is already running further up
/// the stack, i.e. the instance contains itself.
struct WalkGuard((usize, Walk));

impl WalkGuard {
	fn enter(instance: &Instance, walk: Walk) -> Option<Self> {
		let key = (instance.addr(), walk);
		IN_PROGRESS
			.with_borrow_mut(|active| active.insert(key))
			.then_some(Self(key))
	}
}

impl Drop for WalkGuard {
	fn drop(&mut self) {
		IN_PROGRESS.with_borrow_mut(|active| active.remove(&self.0));
	}
}

/// Cyclic instances compare equal when the cycle is reached again with the
/// same pair of instances.
impl PartialEq for Instance {
	fn eq(&self, other: &Self) -> bool {
		if self.ty() != other.ty() {
			return false;
		}
		if self.ptr_eq(other) {
			return true;
		}
		let Some(_guard) = WalkGuard::enter(self, Walk::Eq(other.addr())) else {
			return true;
		};
		self.field_values() == other.field_values()
	}
}

impl Eq for Instance {}

impl Hash for Instance {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let Some(_guard) = WalkGuard::enter(self, Walk::Hash) else {
			return;
		};
		for value in self.field_values() {
			value.hash(state);
		}
	}
}

/// Canonical representation: `Name(a=repr(a), b=repr(b))`.
///
/// An instance reached again while it is being formatted prints as `...`.
impl fmt::Display for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Some(_guard) = WalkGuard::enter(self, Walk::Repr) else {
			return f.write_str("...");
		};
		write!(f, "{}(", self.ty().name())?;
		for (i, (name, value)) in self.fields().iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{name}={value}")?;
		}
		f.write_str(")")
	}
}

/// Identical to `Display`; there is no separate informal form.
impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}
