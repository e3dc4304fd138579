//! Declaration macros.

/// Declares and synthesizes a value type.
///
/// Fields are declared in source order. A parent, if given, is an in-scope
/// [`TypeDef`](crate::TypeDef) binding. The only accepted default is `None`.
///
/// ```
/// use cobble::{Value, data_type};
///
/// let track = data_type! { Track { title, length = None } };
/// let t = track.construct(["Intro"]).unwrap();
/// assert_eq!(t.get("length"), Some(Value::None));
/// ```
///
/// Any other default is rejected at compile time:
///
/// ```compile_fail
/// let track = cobble::data_type! { Track { title, length = 5 } };
/// ```
#[macro_export]
macro_rules! data_type {
	($name:ident $(: $parent:ident)? { $($field:ident $(= $default:tt)?),* $(,)? }) => {{
		let builder = $crate::TypeBuilder::new(stringify!($name));
		$(let builder = builder.extends(&$parent);)?
		$(let builder = builder.field(stringify!($field), $crate::__cobble_field!($($default)?));)*
		$crate::data(builder.build())
	}};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __cobble_field {
	() => {
		$crate::field()
	};
	(None) => {
		$crate::optional_field()
	};
	($other:tt) => {
		compile_error!(concat!("default value must be None, not ", stringify!($other)))
	};
}
