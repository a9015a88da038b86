//! CLI command implementations.

pub mod batch;
pub mod run;
pub mod single;
