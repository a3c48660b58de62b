//! streamlab: worked examples of sequence processing
//!
//! # Architecture
//!
//! - `domain`: sequence operations, decimals and heterogeneous values (no I/O)
//! - `application`: catalog of runnable examples and their run context
//! - `config`: layered settings
//! - `cli`: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
