//! Shared error definitions for tool declaration and dispatch.

use std::fmt::Display;

use thiserror::Error;

/// Result alias used throughout the toolbox.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while declaring tools or dispatching tool calls.
///
/// Declaration errors (`InvalidParameterType`, `InvalidSpec`,
/// `DuplicateParameter`, `DuplicateTool`) are surfaced immediately so the
/// schema is known to be well-formed before any dispatch happens. Dispatch
/// errors are captured per call and never abort the rest of a batch.
#[derive(Debug, Error)]
pub enum Error {
    /// A declared parameter type is outside the supported JSON Schema subset.
    #[error("unsupported parameter type `{kind}`")]
    InvalidParameterType {
        /// The unrecognized type name as supplied.
        kind: String,
    },

    /// A tool or parameter declaration failed structural validation.
    #[error("invalid tool spec: {reason}")]
    InvalidSpec {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Two parameters on one tool share a name.
    #[error("tool `{tool}` declares parameter `{name}` more than once")]
    DuplicateParameter {
        /// Name of the tool being declared.
        tool: String,
        /// The colliding parameter name.
        name: String,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// Requested tool does not exist in the registry.
    #[error("tool `{name}` is not registered")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// The tool-call arguments payload did not parse as a JSON object.
    #[error("malformed arguments for tool `{tool}`: {reason}")]
    MalformedArguments {
        /// Name of the tool the arguments were intended for.
        tool: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// A required parameter was absent from the bound arguments.
    #[error("tool `{tool}` is missing required parameter `{name}`")]
    MissingRequiredParameter {
        /// Name of the tool being invoked.
        tool: String,
        /// Name of the absent parameter.
        name: String,
    },

    /// The arguments carried a key that matches no declared parameter.
    #[error("tool `{tool}` received unexpected argument `{name}`")]
    UnexpectedArgument {
        /// Name of the tool being invoked.
        tool: String,
        /// The unrecognized argument key.
        name: String,
    },

    /// The tool handler itself failed.
    #[error("tool `{tool}` execution failed: {reason}")]
    Execution {
        /// Name of the tool that was invoked.
        tool: String,
        /// Human-readable cause reported by the handler.
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidSpec`] from the supplied reason.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Execution`] for the supplied tool and cause.
    #[must_use]
    pub fn execution(tool: impl Into<String>, reason: impl Display) -> Self {
        Self::Execution {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an [`Error::MalformedArguments`] for the supplied tool.
    #[must_use]
    pub fn malformed_arguments(tool: impl Into<String>, reason: impl Display) -> Self {
        Self::MalformedArguments {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_carries_tool_name() {
        let err = Error::execution("greet", "boom");
        assert!(matches!(err, Error::Execution { ref tool, ref reason } if tool == "greet" && reason == "boom"));
        assert_eq!(err.to_string(), "tool `greet` execution failed: boom");
    }

    #[test]
    fn invalid_spec_formats_reason() {
        let err = Error::invalid_spec("name cannot be empty");
        assert_eq!(err.to_string(), "invalid tool spec: name cannot be empty");
    }
}
