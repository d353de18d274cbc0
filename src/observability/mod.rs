//! Observability module.
//!
//! Logging infrastructure for build runs. The tool is a short-lived batch
//! process, so there is no metrics endpoint; structured logs on stderr are
//! the build log.

pub mod logging;

pub use logging::{LogFormat, init_logging};
