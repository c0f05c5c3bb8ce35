//! Tradepost API library.
//!
//! This crate provides the backend functionality as a library, allowing it
//! to be tested and reused. The `tradepost-api` binary wires it to a TCP
//! listener; integration tests mount [`routes::routes`] directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
