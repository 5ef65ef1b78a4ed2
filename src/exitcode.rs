//! Standard exit codes (BSD sysexits.h compatible, plus shell conventions)

/// Successful termination
pub const OK: i32 = 0;

/// Generic failure when no better code is known
pub const FAILURE: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Configuration error
pub const CONFIG: i32 = 78;

/// Command found but could not be executed (shell convention)
pub const CANNOT_EXECUTE: i32 = 126;

/// Command not found (shell convention)
pub const NOT_FOUND: i32 = 127;

/// Added to the signal number when a child is killed by a signal (shell convention)
pub const SIGNAL_BASE: i32 = 128;
