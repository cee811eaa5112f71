//! CLI command implementations

pub mod batch;
pub mod generate;
pub mod json_output;
pub mod preview;
