//! Shared utilities.
//!
//! File helpers used by every step that writes to the project, plus test
//! helpers.

pub mod fs;

#[cfg(test)]
pub mod testutil;
