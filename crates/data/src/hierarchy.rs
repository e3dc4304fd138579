//! Visitable hierarchy registry.
//!
//! # Role
//!
//! Tracks which types are marked visitable and, for every ancestor, which
//! synthesized types descend from it. Entries only accumulate; nothing is
//! ever removed.
//!
//! Synthesis records a type under every type in its ancestry, visitable or
//! not. Visitability only gates what [`HierarchyRegistry::descendants`]
//! reports, so marking a root after its descendants were synthesized still
//! sees them.

use std::sync::LazyLock;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::types::{TypeDef, TypeId};

#[derive(Default)]
struct HierarchyState {
	visitable: HashSet<TypeId>,
	/// Synthesized descendants per ancestor, in registration order.
	by_ancestor: HashMap<TypeId, Vec<TypeDef>>,
}

/// Registry of visitable roots and their synthesized descendants.
#[derive(Default)]
pub struct HierarchyRegistry {
	state: Mutex<HierarchyState>,
}

impl HierarchyRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks `ty` as a visitable root.
	pub fn mark_visitable(&self, ty: &TypeDef) {
		let inserted = self.state.lock().visitable.insert(ty.id());
		if inserted {
			tracing::debug!(ty = ty.name(), "marked visitable");
		}
	}

	pub fn is_visitable(&self, ty: &TypeDef) -> bool {
		self.state.lock().visitable.contains(&ty.id())
	}

	/// Records a synthesized type under each type in its ancestry, itself included.
	///
	/// Idempotent: re-registering a type leaves every set unchanged.
	pub fn register(&self, ty: &TypeDef) {
		let mut state = self.state.lock();
		for ancestor in ty.ancestry() {
			let entry = state.by_ancestor.entry(ancestor.id()).or_default();
			if !entry.contains(ty) {
				entry.push(ty.clone());
				tracing::debug!(ty = ty.name(), ancestor = ancestor.name(), "registered descendant");
			}
		}
	}

	/// Synthesized descendants of a visitable `root`, sorted by handler name.
	///
	/// Returns an empty list if `root` is not visitable. Types sharing a
	/// handler name keep their registration order.
	pub fn descendants(&self, root: &TypeDef) -> Vec<TypeDef> {
		let state = self.state.lock();
		if !state.visitable.contains(&root.id()) {
			return Vec::new();
		}
		let mut found = state.by_ancestor.get(&root.id()).cloned().unwrap_or_default();
		drop(state);
		found.sort_by(|a, b| a.handler_name().cmp(b.handler_name()));
		found
	}
}

/// Process-wide registry used by [`crate::data`] and [`visitable`].
pub static HIERARCHY: LazyLock<HierarchyRegistry> = LazyLock::new(HierarchyRegistry::new);

/// Marks `ty` visitable in the process-wide registry and returns it unchanged.
pub fn visitable(ty: TypeDef) -> TypeDef {
	HIERARCHY.mark_visitable(&ty);
	ty
}
