//! Domain layer: sequence operations and the values they work on
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod decimal;
pub mod error;
pub mod ops;
pub mod value;

pub use decimal::Decimal;
pub use error::{require, DomainError, DomainResult};
pub use ops::{ExecutionMode, SequenceBuilder, SortOrder};
pub use value::Value;
