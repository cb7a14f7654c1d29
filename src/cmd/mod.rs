//! Command handlers for the bundle-delta CLI
//!
//! This module contains the command implementations. The comparison itself is
//! the default command; completions generation is the only subcommand.

pub mod compare;
pub mod completions;

// Re-export command functions for convenient access
pub use compare::cmd_compare;
pub use completions::cmd_completions;
