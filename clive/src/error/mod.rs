//! Error types produced while synthesizing and running generated commands.

mod constructors;
mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{ActionError, CliveError, CliveResult};

#[cfg(test)]
mod tests;
