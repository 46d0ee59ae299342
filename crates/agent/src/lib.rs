//! The conversation loop, the heart of Persona.
//!
//! One turn follows a small state machine:
//!
//! 1. **AwaitingModel**: send the transcript and tool descriptors to the provider
//! 2. **ExecutingTools**: if the model stopped to call tools, run each one in
//!    order and append its result, then go back to step 1
//! 3. **Done**: any other stop reason ends the turn with the model's text
//!
//! The transcript lives only for the duration of one turn; callers own history.

pub mod bootstrap;
pub mod loop_runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use bootstrap::build_agent;
pub use loop_runner::AgentLoop;
