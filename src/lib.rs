//! mkvedit Library
//!
//! Batch editing of Matroska segment titles and filenames, driven by an
//! interactive review loop or by numbering patterns.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
