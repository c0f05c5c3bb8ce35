//! CLI command implementations.

pub mod admin;
pub mod clean;
pub mod migrate;
