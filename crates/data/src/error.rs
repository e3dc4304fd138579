//! Error kinds raised while declaring, constructing and dispatching value types.
//!
//! Every failure here is a programming error surfaced synchronously at the
//! offending call. Nothing is retried.

/// A type or field was declared or used inconsistently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	/// A field default other than `None` was supplied.
	#[error("default value must be None")]
	InvalidDefault,
	/// A copy override named a field the type does not declare.
	#[error("{type_name} has no field named {field:?}")]
	UnknownField { type_name: String, field: String },
	/// A dispatcher was requested over a root that was never marked visitable.
	#[error("{type_name} is not visitable")]
	NotVisitable { type_name: String },
}

/// Constructor arguments could not be bound to a type's fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
	#[error("{type_name}() takes {} but {} given", positional(.expected), were_given(.given))]
	TooMany {
		type_name: String,
		expected: usize,
		given: usize,
	},
	#[error("{type_name}() missing required arguments: {}", join_names(.names))]
	Missing { type_name: String, names: Vec<String> },
	#[error("{type_name}() got an unexpected keyword argument {name:?}")]
	Unexpected { type_name: String, name: String },
	#[error("{type_name}() got multiple values for argument {name:?}")]
	Duplicate { type_name: String, name: String },
}

/// Double dispatch could not route a value to a handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	/// The dispatcher has no handler for the value's variant.
	#[error("{dispatcher} does not handle {type_name} (no {handler})")]
	UnhandledVariant {
		dispatcher: String,
		type_name: String,
		handler: String,
	},
	/// The value has no dispatch hook.
	#[error("cannot visit {repr}: value has no dispatch hook")]
	NotVisitable { repr: String },
	/// `visit` received the wrong number of extra arguments.
	#[error("{dispatcher}.visit expects {expected} extra arguments, got {given}")]
	ArgumentCount {
		dispatcher: String,
		expected: usize,
		given: usize,
	},
}

/// A dispatcher implementation is missing required handlers.
///
/// `missing` is sorted; the message reads "abstract method" for one name and
/// "abstract methods" for several.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Can't instantiate abstract class {class} with {}", abstract_methods(.missing))]
pub struct CompletenessError {
	pub class: String,
	pub missing: Vec<String>,
}

fn positional(expected: &usize) -> String {
	match expected {
		1 => "1 positional argument".to_string(),
		n => format!("{n} positional arguments"),
	}
}

fn were_given(given: &usize) -> String {
	match given {
		1 => "1 was".to_string(),
		n => format!("{n} were"),
	}
}

fn join_names(names: &[String]) -> String {
	names.join(", ")
}

fn abstract_methods(missing: &[String]) -> String {
	let noun = if missing.len() == 1 {
		"abstract method"
	} else {
		"abstract methods"
	};
	format!("{noun} {}", missing.join(", "))
}

/// Umbrella error returned by dispatch handlers and `visit`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Argument(#[from] ArgumentError),
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	#[error(transparent)]
	Completeness(#[from] CompletenessError),
	/// Raised by user handlers.
	#[error("{0}")]
	Custom(String),
}

impl Error {
	pub fn custom(msg: impl Into<String>) -> Self {
		Self::Custom(msg.into())
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
