//! Field registry: the canonical field order of a type.

use rustc_hash::FxHashMap as HashMap;

use crate::field::FieldDescriptor;
use crate::types::TypeDef;

/// One entry of a [`FieldLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	name: Box<str>,
	descriptor: FieldDescriptor,
}

impl Field {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn descriptor(&self) -> &FieldDescriptor {
		&self.descriptor
	}
}

/// Fields of a type sorted by declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLayout {
	fields: Vec<Field>,
}

impl FieldLayout {
	/// Collects the fields visible on `ty` and sorts them by declaration order.
	///
	/// Fields declared on ancestors are inherited with their original key. A
	/// name redeclared on a subtype takes the subtype's descriptor, and with it
	/// the subtype's position.
	pub fn collect(ty: &TypeDef) -> Self {
		let mut visible: HashMap<&str, FieldDescriptor> = HashMap::default();
		let chain: Vec<&TypeDef> = ty.ancestry().collect();
		for t in chain.into_iter().rev() {
			for (name, descriptor) in t.declared() {
				visible.insert(&**name, *descriptor);
			}
		}

		let mut fields: Vec<Field> = visible
			.into_iter()
			.map(|(name, descriptor)| Field {
				name: Box::from(name),
				descriptor,
			})
			.collect();
		fields.sort_by_key(|f| f.descriptor.order());
		Self { fields }
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Field> {
		self.fields.iter()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(Field::name)
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|f| &*f.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.position(name).is_some()
	}
}

impl<'a> IntoIterator for &'a FieldLayout {
	type Item = &'a Field;
	type IntoIter = std::slice::Iter<'a, Field>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}
