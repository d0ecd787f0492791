//! Subcommand implementations. Each returns the text to print.

pub mod aircraft;
pub mod arc;
pub mod brief;
