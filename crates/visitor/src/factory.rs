//! Dispatcher types built from the hierarchy registry.

use std::collections::BTreeSet;
use std::sync::Arc;

use cobble_data::{ConfigError, HIERARCHY, HierarchyRegistry, TypeDef};

use crate::implementation::ImplementationBuilder;

/// Configuration of a dispatcher type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorOptions {
	/// Number of extra positional arguments every `visit` call forwards.
	pub args: usize,
	/// Display name of the dispatcher type. Defaults to `<Root>Visitor`.
	pub name: Option<String>,
}

impl VisitorOptions {
	pub fn args(mut self, args: usize) -> Self {
		self.args = args;
		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}
}

pub(crate) struct VisitorTypeInner {
	pub(crate) name: Box<str>,
	pub(crate) root: TypeDef,
	pub(crate) required: BTreeSet<Box<str>>,
	pub(crate) args: usize,
}

/// Abstract dispatcher over a visitable root.
///
/// The required handlers are frozen when the type is built: variants
/// synthesized later are not required and fail dispatch unless an
/// implementation happens to handle them anyway.
#[derive(Clone)]
pub struct VisitorType(pub(crate) Arc<VisitorTypeInner>);

impl VisitorType {
	pub fn name(&self) -> &str {
		&self.0.name
	}

	pub fn root(&self) -> &TypeDef {
		&self.0.root
	}

	/// Extra argument count forwarded by `visit`.
	pub fn args(&self) -> usize {
		self.0.args
	}

	/// Required handler names, sorted.
	pub fn required_handlers(&self) -> impl Iterator<Item = &str> {
		self.0.required.iter().map(|h| &**h)
	}

	/// Starts a concrete implementation of this dispatcher type.
	pub fn extend(&self, name: impl Into<Box<str>>) -> ImplementationBuilder {
		ImplementationBuilder::new(self.clone(), name.into())
	}
}

impl std::fmt::Debug for VisitorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VisitorType")
			.field("name", &self.0.name)
			.field("root", &self.0.root.name())
			.field("required", &self.0.required)
			.field("args", &self.0.args)
			.finish()
	}
}

/// Builds a dispatcher type over `root` with default options.
pub fn visitor(root: &TypeDef) -> Result<VisitorType, ConfigError> {
	visitor_with(root, VisitorOptions::default())
}

/// Builds a dispatcher type over `root` from the process-wide registry.
pub fn visitor_with(root: &TypeDef, options: VisitorOptions) -> Result<VisitorType, ConfigError> {
	visitor_in(&HIERARCHY, root, options)
}

/// Builds a dispatcher type requiring one handler per descendant of `root`
/// currently recorded in `registry`.
pub fn visitor_in(registry: &HierarchyRegistry, root: &TypeDef, options: VisitorOptions) -> Result<VisitorType, ConfigError> {
	if !registry.is_visitable(root) {
		return Err(ConfigError::NotVisitable {
			type_name: root.name().to_string(),
		});
	}

	let required: BTreeSet<Box<str>> = registry
		.descendants(root)
		.iter()
		.map(|t| Box::from(t.handler_name()))
		.collect();
	let name = options
		.name
		.unwrap_or_else(|| format!("{}Visitor", root.name()))
		.into_boxed_str();

	tracing::debug!(
		visitor = &*name,
		root = root.name(),
		required = required.len(),
		args = options.args,
		"built dispatcher type"
	);

	Ok(VisitorType(Arc::new(VisitorTypeInner {
		name,
		root: root.clone(),
		required,
		args: options.args,
	})))
}
