//! Parameter declarations and the model-facing tool schema.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// JSON Schema type of a declared tool parameter.
///
/// Restricted to the primitive subset accepted by chat-completions
/// function-calling APIs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// UTF-8 text.
    String,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Number,
    /// True or false.
    Boolean,
    /// Nested JSON object.
    Object,
    /// JSON array.
    Array,
}

impl ParameterKind {
    /// Returns the JSON Schema name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            other => Err(Error::InvalidParameterType {
                kind: other.to_owned(),
            }),
        }
    }
}

/// Declaration of a single tool parameter.
///
/// Immutable once constructed; owned by the [`ToolSpec`](crate::ToolSpec)
/// it is attached to.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    name: String,
    kind: ParameterKind,
    description: Option<String>,
    required: bool,
    allowed_values: Vec<Value>,
}

impl ParameterSpec {
    /// Creates a required parameter of the supplied kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] if the name is empty.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_spec("parameter name cannot be empty"));
        }

        Ok(Self {
            name,
            kind,
            description: None,
            required: true,
            allowed_values: Vec::new(),
        })
    }

    /// Sets the human-readable description surfaced in the schema.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the parameter as optional (parameters default to required).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Restricts the parameter to the supplied values (JSON Schema `enum`).
    #[must_use]
    pub fn with_allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = values;
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the model must supply this parameter.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the allowed values, empty when unrestricted.
    #[must_use]
    pub fn allowed_values(&self) -> &[Value] {
        &self.allowed_values
    }

    fn property_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_owned(), Value::from(self.kind.as_str()));
        if let Some(description) = &self.description {
            property.insert("description".to_owned(), Value::from(description.clone()));
        }
        if !self.allowed_values.is_empty() {
            property.insert("enum".to_owned(), Value::Array(self.allowed_values.clone()));
        }
        Value::Object(property)
    }
}

/// One entry of the model-facing `tools` array.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionSchema,
}

impl ToolDefinition {
    /// Builds the wire definition for a tool from its declared parameters.
    ///
    /// `properties` preserves parameter declaration order; `required` lists
    /// exactly the parameters declared as required.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: &[ParameterSpec]) -> Self {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for parameter in parameters {
            properties.insert(parameter.name().to_owned(), parameter.property_schema());
            if parameter.is_required() {
                required.push(parameter.name().to_owned());
            }
        }

        Self {
            kind: "function",
            function: FunctionSchema {
                name: name.into(),
                description: description.into(),
                strict: true,
                parameters: ObjectSchema {
                    kind: "object",
                    properties,
                    required,
                },
            },
        }
    }

    /// Returns the described function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// The `function` member of a tool definition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionSchema {
    name: String,
    description: String,
    strict: bool,
    parameters: ObjectSchema,
}

/// JSON Schema object describing a function's parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectSchema {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Map<String, Value>,
    required: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_parses_supported_names() {
        for name in ["string", "integer", "number", "boolean", "object", "array"] {
            let kind = name.parse::<ParameterKind>().expect("supported kind");
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn kind_rejects_unsupported_names() {
        let err = "tuple".parse::<ParameterKind>().expect_err("unsupported kind");
        assert!(matches!(err, Error::InvalidParameterType { kind } if kind == "tuple"));
    }

    #[test]
    fn parameter_name_cannot_be_empty() {
        let err = ParameterSpec::new("  ", ParameterKind::String).expect_err("empty name");
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn parameter_defaults_to_required() {
        let spec = ParameterSpec::new("who", ParameterKind::String).unwrap();
        assert!(spec.is_required());
        assert!(spec.description().is_none());

        let spec = spec.optional().with_description("greeting target");
        assert!(!spec.is_required());
        assert_eq!(spec.description(), Some("greeting target"));
    }

    #[test]
    fn definition_matches_wire_shape() {
        let parameters = vec![
            ParameterSpec::new("who", ParameterKind::String)
                .unwrap()
                .with_description("The name of the person to greet"),
            ParameterSpec::new("loud", ParameterKind::Boolean)
                .unwrap()
                .with_description("Shout the greeting")
                .optional(),
        ];

        let definition = ToolDefinition::new("hello_world", "Greets someone", &parameters);
        let value = serde_json::to_value(&definition).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "function",
                "function": {
                    "name": "hello_world",
                    "description": "Greets someone",
                    "strict": true,
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "who": {
                                "type": "string",
                                "description": "The name of the person to greet",
                            },
                            "loud": {
                                "type": "boolean",
                                "description": "Shout the greeting",
                            },
                        },
                        "required": ["who"],
                    },
                },
            })
        );
    }

    #[test]
    fn properties_preserve_declaration_order() {
        let parameters = vec![
            ParameterSpec::new("zeta", ParameterKind::String).unwrap(),
            ParameterSpec::new("alpha", ParameterKind::Integer).unwrap(),
        ];

        let value = serde_json::to_value(ToolDefinition::new("t", "d", &parameters)).unwrap();
        let keys: Vec<&String> = value["function"]["parameters"]["properties"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn allowed_values_surface_as_enum() {
        let parameters = vec![
            ParameterSpec::new("unit", ParameterKind::String)
                .unwrap()
                .with_allowed_values(vec![json!("celsius"), json!("fahrenheit")]),
        ];

        let value = serde_json::to_value(ToolDefinition::new("t", "d", &parameters)).unwrap();
        assert_eq!(
            value["function"]["parameters"]["properties"]["unit"]["enum"],
            json!(["celsius", "fahrenheit"])
        );
    }
}
