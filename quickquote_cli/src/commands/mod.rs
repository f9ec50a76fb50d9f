//! CLI subcommand implementations.

pub mod movers;
pub mod quote;
