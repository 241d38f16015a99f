//! Primary error enum for build-time and invocation-time failures.

use thiserror::Error;

/// Boxed error returned by command actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias for results carrying a [`CliveError`].
pub type CliveResult<T> = Result<T, CliveError>;

/// Errors raised while turning annotated records into commands, or while
/// reading parsed values back into records.
///
/// Everything except [`CliveError::CliParsing`] and [`CliveError::Action`]
/// points at a defect in static declarations rather than at user input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliveError {
    /// An annotation segment had no `key:value` separator.
    #[error("malformed tag: '{segment}'")]
    MalformedTag {
        /// The offending segment, verbatim.
        segment: String,
    },

    /// An annotation segment used a key outside `name`, `usage`, `hidden`
    /// and `default`.
    #[error("unknown command tag: '{segment}' (key '{key}')")]
    UnknownKey {
        /// Key that was not recognised.
        key: String,
        /// The offending segment, verbatim.
        segment: String,
    },

    /// The `hidden` key carried something other than a boolean literal.
    #[error("failed to parse 'hidden' as a bool: '{value}'")]
    InvalidHidden {
        /// Literal that failed to parse.
        value: String,
    },

    /// A flag field was declared with a type outside the supported set.
    #[error("unsupported flag generator type: {type_name}")]
    UnsupportedType {
        /// Declared type, as written in the record.
        type_name: String,
    },

    /// The record type has no name to derive a command name from.
    #[error("need a named record type to determine command name")]
    AnonymousRecord,

    /// The record does not start with a command marker field.
    #[error("record '{record}' is malformed: {reason}")]
    Structure {
        /// Name of the record type.
        record: String,
        /// What was wrong with its layout.
        reason: String,
    },

    /// Synthesis or extraction failed for a specific field.
    #[error("failed to generate flag from field '{field}': {source}")]
    Field {
        /// Field that triggered the failure.
        field: String,
        /// Underlying failure.
        #[source]
        source: Box<CliveError>,
    },

    /// An argument that must be present was missing or empty.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Explanation of the rejected argument.
        reason: String,
    },

    /// Two fields of one command produced the same flag name.
    #[error("duplicate flag '--{flag}' in command '{command}' (fields '{first}' and '{second}')")]
    DuplicateFlag {
        /// Command containing the collision.
        command: String,
        /// Flag name both fields map to.
        flag: String,
        /// Field that claimed the name first.
        first: String,
        /// Field that collided with it.
        second: String,
    },

    /// A field's name, or its `name` override, kebab-cases to nothing.
    #[error("flag name derived from '{origin}' is empty")]
    EmptyFlagName {
        /// Field name or override the flag name was derived from.
        origin: String,
    },

    /// A field claimed a flag name the parser registers on its own.
    #[error("flag '--{flag}' of field '{field}' in command '{command}' is reserved")]
    ReservedFlag {
        /// Command declaring the flag.
        command: String,
        /// Reserved flag name.
        flag: String,
        /// Field that claimed it.
        field: String,
    },

    /// Two records produced the same command name.
    #[error("duplicate command '{command}' (records '{first}' and '{second}')")]
    DuplicateCommand {
        /// Command name both records map to.
        command: String,
        /// Record that claimed the name first.
        first: String,
        /// Record that collided with it.
        second: String,
    },

    /// A value read from the parse context did not fit the field's type.
    #[error("value for field '{field}' is not a {expected}")]
    ValueMismatch {
        /// Field being assembled.
        field: String,
        /// Kind the field expected.
        expected: &'static str,
    },

    /// The parse context could not answer a lookup for a flag, usually
    /// because the matches belong to a different command.
    #[error("failed to read flag '--{flag}': {source}")]
    Lookup {
        /// Flag that was looked up.
        flag: String,
        /// Error reported by the parse context.
        #[source]
        source: clap::parser::MatchesError,
    },

    /// Error parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A command action reported a failure.
    #[error("command '{command}' failed: {source}")]
    Action {
        /// Name of the command whose action failed.
        command: String,
        /// Error returned by the action.
        #[source]
        source: ActionError,
    },
}
