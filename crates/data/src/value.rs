use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::instance::Instance;

/// A field value.
///
/// `Display` writes the canonical representation used by `repr`.
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	None,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(Arc<str>),
	List(Arc<[Value]>),
	Instance(Instance),
}

impl Value {
	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_instance(&self) -> Option<&Instance> {
		match self {
			Value::Instance(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the canonical representation.
	pub fn repr(&self) -> String {
		self.to_string()
	}

	/// Name of the value's kind, or the type name for instances.
	pub fn type_name(&self) -> &str {
		match self {
			Value::None => "NoneType",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Str(_) => "str",
			Value::List(_) => "list",
			Value::Instance(i) => i.ty().name(),
		}
	}
}

/// Bit pattern under which floats are compared and hashed.
///
/// Folds `-0.0` into `0.0` and every NaN into one NaN so that equality stays
/// reflexive and agrees with the hash.
fn float_key(v: f64) -> u64 {
	if v.is_nan() {
		f64::NAN.to_bits()
	} else if v == 0.0 {
		0
	} else {
		v.to_bits()
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::None, Value::None) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Instance(a), Value::Instance(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Value::None => {}
			Value::Bool(v) => v.hash(state),
			Value::Int(v) => v.hash(state),
			Value::Float(v) => float_key(*v).hash(state),
			Value::Str(v) => v.hash(state),
			Value::List(v) => v.hash(state),
			Value::Instance(v) => v.hash(state),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => f.write_str("None"),
			Value::Bool(true) => f.write_str("True"),
			Value::Bool(false) => f.write_str("False"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write_float(f, *v),
			Value::Str(v) => write_str_repr(f, v),
			Value::List(items) => {
				f.write_char('[')?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_char(']')
			}
			Value::Instance(v) => write!(f, "{v}"),
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
	if v.is_nan() {
		f.write_str("nan")
	} else if v.is_infinite() {
		f.write_str(if v > 0.0 { "inf" } else { "-inf" })
	} else {
		let digits = format!("{v:?}");
		match digits.split_once('e') {
			// Exponents carry a sign and at least two digits: `1e+16`, `1e-05`.
			Some((mantissa, exp)) => {
				let (sign, exp) = match exp.strip_prefix('-') {
					Some(exp) => ('-', exp),
					None => ('+', exp),
				};
				write!(f, "{mantissa}e{sign}{exp:0>2}")
			}
			None => f.write_str(&digits),
		}
	}
}

fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
	let quote = if s.contains('\'') && !s.contains('"') {
		'"'
	} else {
		'\''
	};
	f.write_char(quote)?;
	for c in s.chars() {
		match c {
			'\\' => f.write_str("\\\\")?,
			'\n' => f.write_str("\\n")?,
			'\r' => f.write_str("\\r")?,
			'\t' => f.write_str("\\t")?,
			c if c == quote => {
				f.write_char('\\')?;
				f.write_char(c)?;
			}
			c if c.is_control() => {
				let code = c as u32;
				if code <= 0xff {
					write!(f, "\\x{code:02x}")?;
				} else {
					write!(f, "\\u{code:04x}")?;
				}
			}
			c => f.write_char(c)?,
		}
	}
	f.write_char(quote)
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(Arc::from(v))
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(Arc::from(v))
	}
}

impl From<Instance> for Value {
	fn from(v: Instance) -> Self {
		Value::Instance(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(Arc::from(v))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::None, Into::into)
	}
}
