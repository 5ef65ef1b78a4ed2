//! I/O boundary traits for testability
//!
//! Process spawning is abstracted here so the dispatcher can be exercised
//! with a recording fake instead of a real build tool.

use std::io;
use std::process::{Command, ExitStatus};

use crate::domain::Invocation;
use crate::exitcode;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run an invocation to completion with inherited stdio and return its exit code.
    ///
    /// `Err` means the process could not be started at all.
    fn run(&self, invocation: &Invocation) -> io::Result<i32>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner: spawns the program directly, no shell involved.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<i32> {
        let status = Command::new(invocation.program())
            .args(invocation.arguments())
            .status()?;
        Ok(exit_code_of(status))
    }
}

/// Shell-style exit code: the process's own code, or `128 + signal` if it was killed.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exitcode::SIGNAL_BASE + signal;
        }
    }
    exitcode::FAILURE
}
