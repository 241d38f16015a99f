//! Test helpers shared across the `clive` workspace.
//!
//! [`env`] serialises mutations of the process environment so tests that
//! exercise environment-bound flags can run alongside each other. [`help`]
//! renders and normalises help output for assertions.

pub mod env;
pub mod help;
