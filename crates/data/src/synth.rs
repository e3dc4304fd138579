//! Method synthesis: turning a plain type into a value type.
//!
//! Processing computes the type's [`FieldLayout`] once and stores it on the
//! type. The constructor, equality, hash and representation of
//! [`Instance`] all read that layout; nothing else consults the field list.

use std::sync::Arc;

use crate::error::ArgumentError;
use crate::hierarchy::{HIERARCHY, HierarchyRegistry};
use crate::instance::Instance;
use crate::layout::FieldLayout;
use crate::types::TypeDef;
use crate::value::Value;

/// Makes `ty` a value type and returns the same handle.
///
/// Registers `ty` in the process-wide hierarchy under every ancestor.
pub fn data(ty: TypeDef) -> TypeDef {
	synthesize(&HIERARCHY, &ty);
	ty
}

/// Makes `ty` a value type, registering it in `registry`.
///
/// Processing a type twice keeps the first layout and leaves the registry
/// unchanged.
pub fn synthesize(registry: &HierarchyRegistry, ty: &TypeDef) {
	ty.0.layout.get_or_init(|| {
		let layout = FieldLayout::collect(ty);
		tracing::debug!(
			ty = ty.name(),
			fields = ?layout.names().collect::<Vec<_>>(),
			"synthesized data type"
		);
		Arc::new(layout)
	});
	registry.register(ty);
}

impl TypeDef {
	/// Constructs an instance from positional values in field order.
	pub fn construct<I>(&self, args: I) -> Result<Instance, ArgumentError>
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		self.construct_with(args, std::iter::empty::<(&str, Value)>())
	}

	/// Constructs an instance from positional values followed by named values.
	///
	/// Ancestor constructor logic runs first, root first, then fields are
	/// bound; optional fields left unbound take `None`.
	pub fn construct_with<I, N, K, V>(&self, args: I, named: N) -> Result<Instance, ArgumentError>
	where
		I: IntoIterator,
		I::Item: Into<Value>,
		N: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<Value>,
	{
		let bound = self.bind(args.into_iter().map(Into::into).collect(), named)?;
		let instance = Instance::empty(self);

		let chain: Vec<&TypeDef> = self.ancestry().collect();
		for ty in chain.into_iter().rev() {
			if let Some(init) = ty.init_hook() {
				init(&instance);
			}
		}
		for (name, value) in bound {
			instance.set(name, value);
		}
		Ok(instance)
	}

	fn bind<N, K, V>(&self, positional: Vec<Value>, named: N) -> Result<Vec<(Box<str>, Value)>, ArgumentError>
	where
		N: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<Value>,
	{
		let empty = FieldLayout::default();
		let layout = self.layout().map_or(&empty, |l| &**l);

		if positional.len() > layout.len() {
			return Err(ArgumentError::TooMany {
				type_name: self.name().to_string(),
				expected: layout.len(),
				given: positional.len(),
			});
		}

		let mut slots: Vec<Option<Value>> = vec![None; layout.len()];
		for (slot, value) in slots.iter_mut().zip(positional) {
			*slot = Some(value);
		}

		for (key, value) in named {
			let key = key.as_ref();
			let Some(pos) = layout.position(key) else {
				return Err(ArgumentError::Unexpected {
					type_name: self.name().to_string(),
					name: key.to_string(),
				});
			};
			if slots[pos].is_some() {
				return Err(ArgumentError::Duplicate {
					type_name: self.name().to_string(),
					name: key.to_string(),
				});
			}
			slots[pos] = Some(value.into());
		}

		let missing: Vec<String> = layout
			.iter()
			.zip(&slots)
			.filter(|(f, slot)| slot.is_none() && !f.descriptor().is_optional())
			.map(|(f, _)| f.name().to_string())
			.collect();
		if !missing.is_empty() {
			return Err(ArgumentError::Missing {
				type_name: self.name().to_string(),
				names: missing,
			});
		}

		Ok(layout
			.iter()
			.zip(slots)
			.map(|(f, slot)| {
				let value = slot
					.or_else(|| f.descriptor().default().map(|d| d.to_value()))
					.unwrap_or_default();
				(Box::from(f.name()), value)
			})
			.collect())
	}
}
