//! Operator command line for the inventory system.
//!
//! Loads configuration from the environment, wires the catalog and the
//! notification backends, and runs one sub-command.

pub mod app;
pub mod commands;
pub mod config;

pub use app::{App, ServiceStatus, build_factory};
pub use commands::{CommandLine, Commands, TestEmailArgs};
pub use config::{Config, LogFormat};
