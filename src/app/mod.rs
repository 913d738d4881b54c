//! Application-level configuration shared by the library and the CLI.

pub mod config;

pub use config::SearchConfig;
