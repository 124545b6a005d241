//! Tracing initialisation
//!
//! The service logs through `tracing` macros only. This crate installs the
//! global subscriber once, at startup, in text or JSON form.

mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
