//! Field declaration.
//!
//! Every call to [`field`] (or its variants) draws the next key from a
//! process-wide counter. The key never repeats and never goes backwards, so
//! sorting a type's descriptors by key yields their declaration order no
//! matter how the descriptors were stored in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ConfigError;
use crate::value::Value;

static NEXT_DECLARATION: AtomicU64 = AtomicU64::new(0);

/// Position of a field declaration in the process-wide declaration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationOrder(u64);

impl DeclarationOrder {
	fn next() -> Self {
		Self(NEXT_DECLARATION.fetch_add(1, Ordering::Relaxed))
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

/// Default policy of a field. Only `None` is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldDefault {
	/// The field is optional and defaults to [`Value::None`].
	None,
}

impl FieldDefault {
	pub fn to_value(self) -> Value {
		match self {
			FieldDefault::None => Value::None,
		}
	}
}

/// Immutable metadata produced by a field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
	order: DeclarationOrder,
	default: Option<FieldDefault>,
}

impl FieldDescriptor {
	pub fn order(&self) -> DeclarationOrder {
		self.order
	}

	pub fn default(&self) -> Option<FieldDefault> {
		self.default
	}

	/// Returns true if construction may omit this field.
	pub fn is_optional(&self) -> bool {
		self.default.is_some()
	}
}

/// Declares a required field.
pub fn field() -> FieldDescriptor {
	declare(None)
}

/// Declares a field that defaults to `None`.
pub fn optional_field() -> FieldDescriptor {
	declare(Some(FieldDefault::None))
}

/// Declares a field with an explicit default.
///
/// Any default other than [`Value::None`] is rejected here, before the
/// descriptor exists, rather than when the type is later instantiated.
pub fn field_with_default(default: Value) -> Result<FieldDescriptor, ConfigError> {
	if !default.is_none() {
		return Err(ConfigError::InvalidDefault);
	}
	Ok(declare(Some(FieldDefault::None)))
}

fn declare(default: Option<FieldDefault>) -> FieldDescriptor {
	let order = DeclarationOrder::next();
	tracing::trace!(order = order.0, optional = default.is_some(), "field declared");
	FieldDescriptor { order, default }
}
