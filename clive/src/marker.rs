//! The command marker field and action bindings.

use std::fmt;
use std::sync::Arc;

use clap::ArgMatches;

use crate::error::ActionError;

/// Result returned by a command action.
pub type ActionResult = Result<(), ActionError>;

/// Callback run when a command is invoked.
///
/// Actions receive the matches of their own command, so a subcommand action
/// sees only its subcommand's flags.
#[derive(Clone)]
pub struct Action(Arc<dyn Fn(&ArgMatches) -> ActionResult + Send + Sync>);

impl Action {
    /// Wraps a callback.
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ArgMatches) -> ActionResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the callback.
    ///
    /// # Errors
    ///
    /// Propagates whatever the callback returns.
    pub fn call(&self, matches: &ArgMatches) -> ActionResult {
        (self.0)(matches)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Required first field of every record.
///
/// Its annotation supplies the command's usage text. An action set on the
/// instance handed to the builder becomes the command's action.
#[derive(Debug, Clone, Default)]
pub struct CommandMarker {
    /// Callback bound to the command, if any.
    pub action: Option<Action>,
}

impl CommandMarker {
    /// A marker bound to `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clive::CommandMarker;
    /// let marker = CommandMarker::with_action(|_| Ok(()));
    /// assert!(marker.action.is_some());
    /// ```
    #[must_use]
    pub fn with_action<F>(f: F) -> Self
    where
        F: Fn(&ArgMatches) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            action: Some(Action::new(f)),
        }
    }
}
