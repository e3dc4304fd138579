use rustc_hash::FxHashMap as HashMap;

use crate::error::{ConfigError, Error};
use crate::instance::Instance;
use crate::value::Value;

/// Returns a new instance of the same type with `overrides` applied.
///
/// Fields not overridden take the source's current values. The result has
/// its own slots; nested instances are shared, as with any field value.
pub fn copy<N, K, V>(instance: &Instance, overrides: N) -> Result<Instance, Error>
where
	N: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Into<Value>,
{
	let ty = instance.ty();
	let mut overrides: HashMap<String, Value> = overrides
		.into_iter()
		.map(|(k, v)| (k.as_ref().to_owned(), v.into()))
		.collect();

	let mut unknown: Vec<&String> = overrides
		.keys()
		.filter(|k| !ty.layout().is_some_and(|l| l.contains(k.as_str())))
		.collect();
	unknown.sort();
	if let Some(field) = unknown.first() {
		return Err(ConfigError::UnknownField {
			type_name: ty.name().to_string(),
			field: field.to_string(),
		}
		.into());
	}

	let named: Vec<(Box<str>, Value)> = instance
		.fields()
		.into_iter()
		.map(|(name, current)| {
			let value = overrides.remove(&*name).unwrap_or(current);
			(name, value)
		})
		.collect();
	Ok(ty.construct_with(std::iter::empty::<Value>(), named)?)
}
