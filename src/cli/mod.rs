//! Command-line interface
//!
//! Argument parsing and command dispatch for the `fieldmanual` binary.

pub mod args;
pub mod commands;
