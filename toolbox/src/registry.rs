//! Tool declaration and the schema-producing registry.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::dispatch::Arguments;
use crate::error::{Error, Result};
use crate::schema::{ParameterSpec, ToolDefinition};

/// Trait implemented by tool executors.
///
/// Handlers receive the argument map bound from the model's JSON payload and
/// run synchronously on the dispatching thread. They are not required to be
/// `Send` or `Sync`; a [`Toolbox`] belongs to a single thread.
pub trait ToolHandler {
    /// Invokes the tool with the bound argument map.
    ///
    /// # Errors
    ///
    /// Any error returned here is captured by the dispatcher as
    /// [`Error::Execution`] for the tool's outcome.
    fn call(&self, args: Arguments) -> Result<Value>;
}

impl<F> ToolHandler for F
where
    F: Fn(Arguments) -> Result<Value>,
{
    fn call(&self, args: Arguments) -> Result<Value> {
        (self)(args)
    }
}

/// A fully-declared tool: metadata plus the callable it wraps.
///
/// Immutable once built; construct via [`ToolSpec::builder`].
pub struct ToolSpec {
    name: String,
    description: String,
    parameters: Vec<ParameterSpec>,
    handler: Box<dyn ToolHandler>,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl ToolSpec {
    /// Starts declaring a tool under the supplied name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ToolBuilder {
        ToolBuilder {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            handler: None,
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description surfaced in the schema.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Builds the wire-format definition for this tool.
    #[must_use]
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(&self.name, &self.description, &self.parameters)
    }

    pub(crate) fn invoke(&self, args: Arguments) -> Result<Value> {
        self.handler.call(args)
    }
}

/// Builder for [`ToolSpec`].
///
/// The builder is the pending declaration: parameters may be attached before
/// the description or handler are known, mirroring how tool metadata tends to
/// accumulate piecewise at startup. Validation happens once in [`build`].
///
/// [`build`]: ToolBuilder::build
pub struct ToolBuilder {
    name: String,
    description: Option<String>,
    parameters: Vec<ParameterSpec>,
    handler: Option<Box<dyn ToolHandler>>,
}

impl ToolBuilder {
    /// Sets the description surfaced to the model.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a parameter declaration. Declaration order is the order
    /// exposed in the schema.
    #[must_use]
    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Sets the callable dispatched when the model requests this tool.
    #[must_use]
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: ToolHandler + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Finalizes the declaration into an immutable [`ToolSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] if the name is empty or the description
    /// or handler is missing, and [`Error::DuplicateParameter`] if two
    /// parameters share a name.
    pub fn build(self) -> Result<ToolSpec> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_spec("tool name cannot be empty"));
        }

        let description = self
            .description
            .ok_or_else(|| Error::invalid_spec(format!("tool `{}` has no description", self.name)))?;

        let handler = self
            .handler
            .ok_or_else(|| Error::invalid_spec(format!("tool `{}` has no handler", self.name)))?;

        for (index, parameter) in self.parameters.iter().enumerate() {
            let collision = self.parameters[..index]
                .iter()
                .any(|earlier| earlier.name() == parameter.name());
            if collision {
                return Err(Error::DuplicateParameter {
                    tool: self.name,
                    name: parameter.name().to_owned(),
                });
            }
        }

        Ok(ToolSpec {
            name: self.name,
            description,
            parameters: self.parameters,
            handler,
        })
    }
}

/// Insertion-ordered registry of declared tools.
///
/// An explicit instance owned by the application; there is no process-wide
/// registry. Not synchronized: registration takes `&mut self` and dispatch
/// runs on the calling thread.
#[derive(Default)]
pub struct Toolbox {
    tools: Vec<ToolSpec>,
}

impl fmt::Debug for Toolbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        f.debug_struct("Toolbox").field("registered", &names).finish()
    }
}

impl Toolbox {
    /// Creates an empty toolbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declared tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, spec: ToolSpec) -> Result<()> {
        if self.get(spec.name()).is_some() {
            return Err(Error::DuplicateTool {
                name: spec.name().to_owned(),
            });
        }

        debug!(tool = spec.name(), parameters = spec.parameters().len(), "registered tool");
        self.tools.push(spec);
        Ok(())
    }

    /// Returns the spec registered under the supplied name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|spec| spec.name() == name)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates registered tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(ToolSpec::name)
    }

    /// Produces the model-facing `tools` array.
    ///
    /// Recomputed on every call so it always reflects the current
    /// registration state; entries appear in registration order, so repeated
    /// calls without intervening registration yield identical output.
    #[must_use]
    pub fn schema(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolSpec::definition).collect()
    }
}
