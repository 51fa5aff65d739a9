//! Tool-call dispatch pipeline.
//!
//! Consumes the tool-call entries of a chat-completions response and invokes
//! the matching registered handlers, collecting one outcome per entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::registry::Toolbox;
use crate::schema::ParameterSpec;

/// Bound argument map handed to tool handlers.
pub type Arguments = Map<String, Value>;

/// A single tool invocation requested by the model.
///
/// Field names follow the chat-completions wire shape so the struct
/// deserializes directly from an API response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned identifier, echoed back in tool-role messages.
    pub id: String,
    /// Entry type; chat-completions APIs emit `"function"`.
    #[serde(rename = "type", default = "function_call_type")]
    pub kind: String,
    /// The requested function and its raw arguments.
    pub function: FunctionCall,
}

fn function_call_type() -> String {
    "function".to_owned()
}

/// Name and JSON-encoded argument string of a requested invocation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Registered tool name.
    pub name: String,
    /// Arguments as a raw JSON object string.
    pub arguments: String,
}

impl ToolCall {
    /// Creates a tool call from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Returns the requested tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Outcome of dispatching one tool call: the originating call plus either
/// the handler's output or the captured failure.
#[derive(Debug)]
pub struct ToolCallOutcome {
    call: ToolCall,
    result: Result<Value>,
}

impl ToolCallOutcome {
    /// Returns the tool call this outcome belongs to.
    #[must_use]
    pub fn call(&self) -> &ToolCall {
        &self.call
    }

    /// Returns the requested tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.call.name()
    }

    /// Returns the handler output or the captured error.
    #[must_use]
    pub fn result(&self) -> std::result::Result<&Value, &Error> {
        self.result.as_ref()
    }

    /// Whether the call completed without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Renders the outcome as the content of a tool-role follow-up message.
    ///
    /// Successful string outputs render bare (no JSON quoting); other values
    /// render as compact JSON. Failures render as
    /// `Error executing {name}: {cause}`.
    #[must_use]
    pub fn content(&self) -> String {
        match &self.result {
            Ok(Value::String(output)) => output.clone(),
            Ok(other) => other.to_string(),
            Err(Error::Execution { reason, .. }) => {
                format!("Error executing {}: {reason}", self.name())
            }
            Err(err) => format!("Error executing {}: {err}", self.name()),
        }
    }
}

impl Toolbox {
    /// Dispatches every tool call in the supplied batch, in order.
    ///
    /// Execution is strictly sequential and single-attempt. A failing entry
    /// never aborts the batch: its error is captured in the outcome and the
    /// remaining entries still run.
    #[must_use]
    pub fn execute(&self, calls: &[ToolCall]) -> Vec<ToolCallOutcome> {
        calls
            .iter()
            .map(|call| {
                let result = self.dispatch(call);
                if let Err(err) = &result {
                    warn!(tool = call.name(), error = %err, "tool call failed");
                }
                ToolCallOutcome {
                    call: call.clone(),
                    result,
                }
            })
            .collect()
    }

    fn dispatch(&self, call: &ToolCall) -> Result<Value> {
        let name = call.name();
        let spec = self.get(name).ok_or_else(|| Error::UnknownTool {
            name: name.to_owned(),
        })?;

        let args = parse_arguments(name, &call.function.arguments)?;
        bind_arguments(name, spec.parameters(), &args)?;

        info!(tool = name, "invoking tool");
        spec.invoke(args).map_err(|err| match err {
            Error::Execution { .. } => err,
            other => Error::execution(name, other),
        })
    }
}

fn parse_arguments(tool: &str, raw: &str) -> Result<Arguments> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| Error::malformed_arguments(tool, err))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::malformed_arguments(
            tool,
            format!("expected a JSON object, got {other}"),
        )),
    }
}

fn bind_arguments(tool: &str, parameters: &[ParameterSpec], args: &Arguments) -> Result<()> {
    for parameter in parameters {
        if parameter.is_required() && !args.contains_key(parameter.name()) {
            return Err(Error::MissingRequiredParameter {
                tool: tool.to_owned(),
                name: parameter.name().to_owned(),
            });
        }
    }

    // Unknown keys are rejected rather than passed through: the schema is
    // advertised with `strict: true`, so an undeclared key is a contract
    // violation on the model's side.
    for key in args.keys() {
        if !parameters.iter().any(|parameter| parameter.name() == key) {
            return Err(Error::UnexpectedArgument {
                tool: tool.to_owned(),
                name: key.clone(),
            });
        }
    }

    Ok(())
}
