use crate::error::Result;
use crate::instance::Instance;
use crate::types::TypeDef;
use crate::value::Value;

/// Receiving side of double dispatch.
///
/// [`Instance::accept`] resolves which handler a value needs and calls back
/// into the dispatcher with that handler's name.
pub trait Dispatcher {
	/// Invokes `handler` on `instance`, forwarding `extra`.
	///
	/// `variant` is the type whose dispatch hook chose `handler`.
	fn dispatch(&self, handler: &str, variant: &TypeDef, instance: &Instance, extra: &[Value]) -> Result<Value>;
}
