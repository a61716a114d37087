//! wotc-bot - World of Tanks Console statistics bot for Reddit.
//!
//! This library exposes the core modules for use in integration tests.

pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod provider;
pub mod record;
pub mod report;
pub mod transport;
