//! # Doctor Finder CLI
//!
//! Command-line client for the directory and the patient portal. Every
//! adapter is wired explicitly in [`context::ClientContext`].

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;
pub mod render;

pub use cli::Cli;
pub use commands::Commands;
pub use context::ClientContext;
