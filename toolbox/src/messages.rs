//! Chat message shapes for reporting tool outcomes back to the model.
//!
//! Dispatch outcomes are not wire-bound by themselves; callers that want to
//! continue the conversation append the messages produced here to the chat
//! history they send back.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::dispatch::{ToolCall, ToolCallOutcome};

/// Roles supported in chat-style conversations.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System messages steer the assistant behaviour.
    System,
    /// User-authored content.
    User,
    /// Assistant (model) responses, including tool-call requests.
    Assistant,
    /// Tool outcomes reported back to the model.
    Tool,
}

impl Display for MessageRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        })
    }
}

/// A chat-completions message, serialized with only the fields it uses.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message author role.
    pub role: MessageRole,
    /// Textual content; absent on pure tool-call messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls issued by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Identifier of the tool call a tool-role message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool name on tool-role messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Builds the assistant message that echoes the dispatched tool calls.
    #[must_use]
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: None,
            tool_calls,
            tool_call_id: None,
            name: None,
        }
    }

    /// Builds the tool-role message reporting one outcome.
    #[must_use]
    pub fn tool_result(outcome: &ToolCallOutcome) -> Self {
        Self {
            role: MessageRole::Tool,
            content: Some(outcome.content()),
            tool_calls: Vec::new(),
            tool_call_id: Some(outcome.call().id.clone()),
            name: Some(outcome.name().to_owned()),
        }
    }
}

/// Converts a batch of outcomes into the follow-up messages for the model:
/// one assistant message echoing every tool call, then one tool-role message
/// per outcome, in dispatch order.
#[must_use]
pub fn conversation_messages(outcomes: &[ToolCallOutcome]) -> Vec<ChatMessage> {
    let calls = outcomes.iter().map(|outcome| outcome.call().clone()).collect();

    let mut messages = Vec::with_capacity(outcomes.len() + 1);
    messages.push(ChatMessage::assistant_tool_calls(calls));
    messages.extend(outcomes.iter().map(ChatMessage::tool_result));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    use crate::dispatch::Arguments;
    use crate::registry::{ToolSpec, Toolbox};
    use crate::schema::{ParameterKind, ParameterSpec};

    fn run_hello_world() -> Vec<ToolCallOutcome> {
        let spec = ToolSpec::builder("hello_world")
            .description("A hello world function that greets someone")
            .parameter(
                ParameterSpec::new("who", ParameterKind::String)
                    .unwrap()
                    .with_description("The name of the person to greet"),
            )
            .handler(|args: Arguments| {
                let who = args.get("who").and_then(Value::as_str).unwrap_or_default();
                Ok(Value::String(format!("Hello {who}")))
            })
            .build()
            .unwrap();

        let mut toolbox = Toolbox::new();
        toolbox.register(spec).unwrap();
        toolbox.execute(&[ToolCall::new("123", "hello_world", r#"{"who": "world"}"#)])
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MessageRole::Tool).unwrap(), json!("tool"));
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn conversation_messages_match_wire_shape() {
        let outcomes = run_hello_world();
        let messages = conversation_messages(&outcomes);

        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "role": "assistant",
                    "tool_calls": [
                        {
                            "id": "123",
                            "type": "function",
                            "function": {
                                "name": "hello_world",
                                "arguments": "{\"who\": \"world\"}",
                            },
                        },
                    ],
                },
                {
                    "role": "tool",
                    "content": "Hello world",
                    "tool_call_id": "123",
                    "name": "hello_world",
                },
            ])
        );
    }

    #[test]
    fn failed_outcome_reports_error_content() {
        let toolbox = Toolbox::new();
        let outcomes = toolbox.execute(&[ToolCall::new("9", "missing", "{}")]);

        let messages = conversation_messages(&outcomes);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, MessageRole::Tool);
        assert_eq!(
            messages[1].content.as_deref(),
            Some("Error executing missing: tool `missing` is not registered")
        );
    }
}
