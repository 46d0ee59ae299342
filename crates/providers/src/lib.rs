//! LLM provider implementations for Persona.
//!
//! All providers implement the `persona_core::Provider` trait.
//! `build_from_config` picks OpenRouter or OpenAI from the loaded configuration.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
