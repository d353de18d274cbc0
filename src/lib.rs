//! `fieldmanual` - Documentation build preparation for plugin platforms
//!
//! This library provides the pieces of the documentation build that run
//! before the site renderer: API stub generation, plugin docs import,
//! ability catalog export, and operator command highlighting.

pub mod abilities;
pub mod cli;
pub mod config;
pub mod error;
pub mod lexer;
pub mod observability;
pub mod plugins;
pub mod stubs;
