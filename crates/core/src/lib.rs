//! # Persona Core
//!
//! Domain types, traits, and error definitions for the Persona assistant.
//! This crate has **no HTTP or runtime dependencies**: it defines the domain
//! model that all other crates implement against.
//!
//! Every collaborator of the conversation loop is a trait here
//! (`Provider`, `Tool`, `Notifier`). Implementations live in their
//! respective crates, and tests substitute scripted ones.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod identity;
pub mod notify;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, MessageToolCall, Role, Transcript};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StopReason, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolResult, ToolRegistry};
pub use identity::{Identity, IdentitySource};
pub use notify::Notifier;
