//! Command implementations.
//!
//! - [`build`] - clean, bundle and inject the runtime shim
//! - [`config`] - print the resolved configuration or its schema

pub mod build;
pub mod config;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use config::execute as config_execute;
