//! Minimal toolbox example: declare a greeting tool, print the schema a chat
//! request would carry, then replay a canned model response against it.

use anyhow::Result;
use serde_json::Value;
use toolbox::{
    Arguments, ParameterKind, ParameterSpec, ToolCall, ToolSpec, Toolbox, conversation_messages,
};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut toolbox = Toolbox::new();
    toolbox.register(
        ToolSpec::builder("hello_world")
            .description("A hello world function that greets someone")
            .parameter(
                ParameterSpec::new("who", ParameterKind::String)?
                    .with_description("The name of the person to greet"),
            )
            .parameter(
                ParameterSpec::new("loud", ParameterKind::Boolean)?
                    .with_description("Shout the greeting")
                    .optional(),
            )
            .handler(|args: Arguments| {
                let who = args.get("who").and_then(Value::as_str).unwrap_or_default();
                let loud = args.get("loud").and_then(Value::as_bool).unwrap_or(false);

                let greeting = if loud {
                    format!("HELLO {}!", who.to_uppercase())
                } else {
                    format!("Hello {who}")
                };
                println!("{greeting}");
                Ok(Value::String(greeting))
            })
            .build()?,
    )?;

    info!("schema sent in the request's `tools` field:");
    println!("{}", serde_json::to_string_pretty(&toolbox.schema())?);

    // What a chat-completions response with two tool calls looks like.
    let calls = [
        ToolCall::new("call_1", "hello_world", r#"{"who": "Alice", "loud": true}"#),
        ToolCall::new("call_2", "hello_world", r#"{"who": "Bob"}"#),
    ];

    let outcomes = toolbox.execute(&calls);
    for outcome in &outcomes {
        info!(
            tool = outcome.name(),
            success = outcome.is_success(),
            content = %outcome.content(),
            "tool call outcome"
        );
    }

    info!("follow-up messages to append to the conversation:");
    println!(
        "{}",
        serde_json::to_string_pretty(&conversation_messages(&outcomes))?
    );

    Ok(())
}
