//! Build, clean and run helper for a CMake-based graphics project.
//!
//! Arguments are validated into a [`domain::CommandDescriptor`], mapped to a
//! [`domain::CommandPlan`] of argument vectors, and executed through an
//! injected [`infrastructure::traits::CommandRunner`]. The external tool's
//! exit code is the helper's exit code.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
