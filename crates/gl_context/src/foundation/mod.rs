//! Foundation module - Core utilities shared by the context subsystems
//!
//! Currently this is only the logging setup; the context code logs through
//! the `log` facade and leaves the backend choice to this module.

pub mod logging;
