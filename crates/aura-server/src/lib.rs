//! Shared library surface for the briefing server and its tests.

pub mod api;
pub mod config;
pub mod state;
