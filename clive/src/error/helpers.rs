//! Helpers for classifying errors surfaced by the argument parser.

use clap::{Error as ClapError, error::ErrorKind};

/// Returns `true` when a [`clap::Error`] corresponds to `--help`,
/// `--version`, or a bare invocation of a tool that requires a subcommand.
///
/// Generated multi-command applications answer a bare invocation with their
/// help text, which clap reports as an error. Entry points can use this check
/// to delegate to [`clap::Error::exit`] and keep a zero exit status for plain
/// help output.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}
