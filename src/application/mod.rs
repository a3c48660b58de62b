//! Application layer: the example catalog and its run context
//!
//! This layer orchestrates domain operations; it performs no terminal I/O.

pub mod catalog;
pub mod error;

pub use catalog::{catalog, find, run, run_all, Example, ExampleReport, RunContext};
pub use error::{ApplicationError, ApplicationResult};
