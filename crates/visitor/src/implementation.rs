//! Concrete dispatchers and double dispatch.

use std::sync::{Arc, OnceLock};

use cobble_data::{CompletenessError, DispatchError, Dispatcher, Instance, Result, TypeDef, Value};
use rustc_hash::FxHashMap as HashMap;

use crate::factory::VisitorType;

/// A handler: receives the visitor (for recursive `visit` calls), the
/// instance, and the forwarded extra arguments.
pub type Handler = Arc<dyn Fn(&Visitor, &Instance, &[Value]) -> Result<Value> + Send + Sync>;

/// Builder collecting handlers for an [`Implementation`].
pub struct ImplementationBuilder {
	base: VisitorType,
	name: Box<str>,
	handlers: HashMap<Box<str>, Handler>,
}

impl ImplementationBuilder {
	pub(crate) fn new(base: VisitorType, name: Box<str>) -> Self {
		Self {
			base,
			name,
			handlers: HashMap::default(),
		}
	}

	/// Implements the handler `name`, e.g. `visit_literal`.
	///
	/// Names outside the required set are accepted and callable.
	pub fn handler(
		mut self,
		name: impl Into<Box<str>>,
		handler: impl Fn(&Visitor, &Instance, &[Value]) -> Result<Value> + Send + Sync + 'static,
	) -> Self {
		self.handlers.insert(name.into(), Arc::new(handler));
		self
	}

	/// Finishes the implementation. Completeness is not checked here.
	pub fn build(self) -> Implementation {
		Implementation(Arc::new(ImplementationInner {
			base: self.base,
			name: self.name,
			handlers: self.handlers,
			checked: OnceLock::new(),
		}))
	}
}

struct ImplementationInner {
	base: VisitorType,
	name: Box<str>,
	handlers: HashMap<Box<str>, Handler>,
	/// Result of the completeness check, computed on first instantiation.
	checked: OnceLock<Result<(), CompletenessError>>,
}

/// A concrete dispatcher type: a [`VisitorType`] plus handlers.
#[derive(Clone)]
pub struct Implementation(Arc<ImplementationInner>);

impl Implementation {
	pub fn name(&self) -> &str {
		&self.0.name
	}

	pub fn base(&self) -> &VisitorType {
		&self.0.base
	}

	/// Creates a dispatcher instance.
	///
	/// Fails if any handler required by the dispatcher type is missing. The
	/// check runs on the first call and its outcome is reused afterwards.
	pub fn instantiate(&self) -> Result<Visitor, CompletenessError> {
		let checked = self.0.checked.get_or_init(|| self.check());
		match checked {
			Ok(()) => Ok(Visitor(self.clone())),
			Err(err) => Err(err.clone()),
		}
	}

	fn check(&self) -> Result<(), CompletenessError> {
		let missing: Vec<String> = self
			.0
			.base
			.required_handlers()
			.filter(|h| !self.0.handlers.contains_key(*h))
			.map(str::to_string)
			.collect();
		if missing.is_empty() {
			return Ok(());
		}
		tracing::debug!(class = &*self.0.name, ?missing, "dispatcher is incomplete");
		Err(CompletenessError {
			class: self.0.name.to_string(),
			missing,
		})
	}
}

impl std::fmt::Debug for Implementation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut handlers: Vec<&str> = self.0.handlers.keys().map(|h| &**h).collect();
		handlers.sort_unstable();
		f.debug_struct("Implementation")
			.field("name", &self.0.name)
			.field("base", &self.0.base.name())
			.field("handlers", &handlers)
			.finish()
	}
}

/// A dispatcher instance.
#[derive(Clone)]
pub struct Visitor(Implementation);

impl Visitor {
	pub fn implementation(&self) -> &Implementation {
		&self.0
	}

	/// Double dispatch: `value`'s dispatch hook picks the handler, which is
	/// then called with `extra` forwarded.
	pub fn visit(&self, value: &Value, extra: &[Value]) -> Result<Value> {
		let expected = self.0.base().args();
		if extra.len() != expected {
			return Err(DispatchError::ArgumentCount {
				dispatcher: self.0.name().to_string(),
				expected,
				given: extra.len(),
			}
			.into());
		}
		match value {
			Value::Instance(instance) => instance.accept(self, extra),
			other => Err(DispatchError::NotVisitable { repr: other.repr() }.into()),
		}
	}
}

impl Dispatcher for Visitor {
	fn dispatch(&self, handler: &str, variant: &TypeDef, instance: &Instance, extra: &[Value]) -> Result<Value> {
		let Some(f) = self.0.0.handlers.get(handler) else {
			tracing::debug!(visitor = self.0.name(), handler, variant = variant.name(), "unhandled variant");
			return Err(DispatchError::UnhandledVariant {
				dispatcher: self.0.name().to_string(),
				type_name: variant.name().to_string(),
				handler: handler.to_string(),
			}
			.into());
		};
		f(self, instance, extra)
	}
}

impl std::fmt::Debug for Visitor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Visitor").field(&self.0.name()).finish()
	}
}
