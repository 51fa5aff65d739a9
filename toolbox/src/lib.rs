//! Describe plain Rust functions as LLM-callable tools and dispatch the
//! model's tool calls back to them.
//!
//! A [`Toolbox`] is an explicit, insertion-ordered registry of [`ToolSpec`]
//! declarations. [`Toolbox::schema`] renders the OpenAI-compatible `tools`
//! array for a chat-completions request; [`Toolbox::execute`] consumes the
//! tool-call entries of the response and invokes the matching handlers,
//! collecting one outcome per entry (continue-on-error).
//!
//! The crate is deliberately synchronous and single-threaded: registration
//! takes `&mut Toolbox`, dispatch runs callables inline on the calling
//! thread, and handlers are not required to be `Send` or `Sync`. Network
//! transport and model invocation are the caller's concern.
//!
//! ```
//! use serde_json::Value;
//! use toolbox::{Arguments, ParameterKind, ParameterSpec, ToolCall, ToolSpec, Toolbox};
//!
//! # fn main() -> toolbox::Result<()> {
//! let mut toolbox = Toolbox::new();
//! toolbox.register(
//!     ToolSpec::builder("hello_world")
//!         .description("A hello world function that greets someone")
//!         .parameter(
//!             ParameterSpec::new("who", ParameterKind::String)?
//!                 .with_description("The name of the person to greet"),
//!         )
//!         .handler(|args: Arguments| {
//!             let who = args.get("who").and_then(Value::as_str).unwrap_or_default();
//!             Ok(Value::String(format!("Hello {who}")))
//!         })
//!         .build()?,
//! )?;
//!
//! let schema = toolbox.schema(); // goes into the request's `tools` field
//! assert_eq!(schema.len(), 1);
//!
//! let calls = [ToolCall::new("call_1", "hello_world", r#"{"who": "world"}"#)];
//! let outcomes = toolbox.execute(&calls);
//! assert_eq!(outcomes[0].content(), "Hello world");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::pedantic)]

pub mod dispatch;
pub mod error;
pub mod messages;
pub mod registry;
pub mod schema;

pub use dispatch::{Arguments, FunctionCall, ToolCall, ToolCallOutcome};
pub use error::{Error, Result};
pub use messages::{ChatMessage, MessageRole, conversation_messages};
pub use registry::{ToolBuilder, ToolHandler, ToolSpec, Toolbox};
pub use schema::{ParameterKind, ParameterSpec, ToolDefinition};
