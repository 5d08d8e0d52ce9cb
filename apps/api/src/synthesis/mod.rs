//! Agent-driven content synthesis: drafting, persona threads, persona votes.

pub mod commenting;
pub mod drafting;
pub mod handlers;
pub mod orchestrator;
pub mod parser;
pub mod personas;
pub mod prompts;
pub mod slug;
pub mod voting;

#[cfg(test)]
pub mod testing;
