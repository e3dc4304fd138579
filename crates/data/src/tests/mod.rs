mod fields;
mod synth;

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{TypeBuilder, TypeDef, data, field};

/// `Album(name, year)`, synthesized.
fn album() -> TypeDef {
	data(
		TypeBuilder::new("Album")
			.field("name", field())
			.field("year", field())
			.build(),
	)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);
	hasher.finish()
}
