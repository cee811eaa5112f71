//! fontgen CLI library.
//!
//! Command implementations for the `fontgen` binary, exposed as a library so
//! they can be tested without spawning a process.

pub mod cli_args;
pub mod commands;
