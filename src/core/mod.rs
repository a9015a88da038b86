//! Core business logic modules.

pub mod executor;
pub mod pattern;
pub mod planner;
pub mod scanner;
pub mod session;
