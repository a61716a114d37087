//! Command parsing and dispatch.
//!
//! Parsing (`tokenizer`, `router`) is pure and never touches the network, so
//! every malformed request is answered without a single provider call.
//! `handlers` executes the parsed commands.

pub mod definitions;
pub mod handlers;
pub mod help;
pub mod router;
pub mod tokenizer;

pub use handlers::Responder;
pub use router::{Command, CommandRouter};
