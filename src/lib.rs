//! Pay Counter — live earnings ticker and salary progress breakdown.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod command;
pub mod config;
pub mod display;
pub mod engine;
pub mod types;
