//! Rendering and normalising help output for assertions.
//!
//! clap wraps long help to the terminal width, so a usage string can be
//! split across lines. Collapsing whitespace lets tests look for whole
//! phrases regardless of wrapping.

/// Renders the long help of `command`.
#[must_use]
pub fn render(command: &clap::Command) -> String {
    command.clone().render_long_help().to_string()
}

/// Collapses every run of whitespace into a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` when `help` mentions `phrase` once wrapping is undone.
#[must_use]
pub fn mentions(help: &str, phrase: &str) -> bool {
    collapse_whitespace(help).contains(&collapse_whitespace(phrase))
}
