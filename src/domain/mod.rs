//! Domain layer: entities and the command mapping
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod plan;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use plan::{CommandPlan, Invocation};
