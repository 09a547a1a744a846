//! CLI subcommand implementations.

pub mod bands;
pub mod common;
pub mod energy;
pub mod rt;
