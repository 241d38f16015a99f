//! Application assembly and dispatch.
//!
//! An application built from one record is flat: its flags, usage and action
//! are the command's own and no subcommand layer exists. Two or more records
//! become named subcommands under an application with no flags of its own.

use std::collections::HashMap;
use std::ffi::OsString;

use clap::{ArgMatches, Command};

use crate::command::CommandSpec;
use crate::error::{CliveError, CliveResult};
use crate::flag::FlagSpec;
use crate::marker::Action;
use crate::record::Record;

/// Long flag `clap` adds to a command that has a version.
const VERSION_FLAG: &str = "version";

/// Collects records and the settings of the application built from them.
#[derive(Default)]
pub struct AppBuilder<'a> {
    name: String,
    version: Option<String>,
    about: Option<String>,
    env_prefix: String,
    records: Vec<&'a dyn Record>,
}

impl<'a> AppBuilder<'a> {
    /// Starts an application called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the version reported by `--version`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the root usage text of a multi-command application. A flat
    /// application always uses its command's usage.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Prepends `prefix` verbatim to every generated environment variable.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Adds a record; each record becomes one command.
    #[must_use]
    pub fn command(mut self, record: &'a dyn Record) -> Self {
        self.records.push(record);
        self
    }

    /// Adds several records in order.
    #[must_use]
    pub fn commands<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Record>,
    {
        self.records.extend(records);
        self
    }

    /// Synthesizes every command and assembles the application.
    ///
    /// Synthesis stops at the first failing record and its error is returned
    /// unchanged; no partial application is produced.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::InvalidArgument`] when no records were added,
    /// the first error raised by [`CommandSpec::from_record`],
    /// [`CliveError::DuplicateCommand`] when two records share a command
    /// name, and [`CliveError::ReservedFlag`] when a flat application with a
    /// version declares a `version` flag.
    pub fn build(self) -> CliveResult<App> {
        if self.records.is_empty() {
            return Err(CliveError::invalid_argument(
                "at least one record is required to build an application",
            ));
        }
        let mut commands = Vec::with_capacity(self.records.len());
        let mut claimed: HashMap<String, &'static str> = HashMap::new();
        for record in &self.records {
            let cmd = CommandSpec::from_record(*record)?.with_env_prefix(&self.env_prefix);
            if let Some(first) = claimed.insert(cmd.name.clone(), record.type_name()) {
                return Err(CliveError::DuplicateCommand {
                    command: cmd.name,
                    first: first.to_owned(),
                    second: record.type_name().to_owned(),
                });
            }
            commands.push(cmd);
        }
        if self.version.is_some()
            && let [single] = commands.as_slice()
            && let Some(flag) = single.flags.iter().find(|flag| flag.name == VERSION_FLAG)
        {
            return Err(CliveError::ReservedFlag {
                command: single.name.clone(),
                flag: flag.name.clone(),
                field: flag.field.to_owned(),
            });
        }
        let app = App::assemble(self.name, self.version, self.about, commands);
        tracing::debug!(
            app = %app.name,
            flat = app.is_flat(),
            commands = app.commands.len(),
            "built application"
        );
        Ok(app)
    }

    /// Like [`AppBuilder::build`], for callers that treat a broken
    /// declaration as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the build error when any record is malformed.
    #[must_use]
    #[track_caller]
    pub fn build_or_panic(self) -> App {
        match self.build() {
            Ok(app) => app,
            Err(err) => panic!("failed to build command-line application: {err}"),
        }
    }
}

/// A built application, either flat or made of named subcommands.
#[derive(Debug, Clone)]
pub struct App {
    /// Application name.
    pub name: String,
    /// Version reported by `--version`.
    pub version: Option<String>,
    /// Root usage text.
    pub usage: String,
    /// Root-level flags; empty unless the application is flat.
    pub flags: Vec<FlagSpec>,
    /// Root-level action; `None` unless the application is flat.
    pub action: Option<Action>,
    /// Subcommands; empty when the application is flat.
    pub commands: Vec<CommandSpec>,
}

impl App {
    /// Starts an [`AppBuilder`].
    #[must_use]
    pub fn builder<'a>(name: impl Into<String>) -> AppBuilder<'a> {
        AppBuilder::new(name)
    }

    fn assemble(
        name: String,
        version: Option<String>,
        about: Option<String>,
        mut commands: Vec<CommandSpec>,
    ) -> Self {
        if commands.len() == 1
            && let Some(single) = commands.pop()
        {
            return Self {
                name,
                version,
                usage: single.usage,
                flags: single.flags,
                action: single.action,
                commands: Vec::new(),
            };
        }
        Self {
            name,
            version,
            usage: about.unwrap_or_default(),
            flags: Vec::new(),
            action: None,
            commands,
        }
    }

    /// Whether the application has no subcommand layer.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.commands.is_empty()
    }

    /// Looks up a subcommand by name.
    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|cmd| cmd.name == name)
    }

    /// Builds the `clap` command tree.
    #[must_use]
    pub fn clap_command(&self) -> Command {
        let mut root = Command::new(self.name.clone())
            .about(self.usage.clone())
            .args(self.flags.iter().map(FlagSpec::to_arg));
        if let Some(version) = &self.version {
            root = root.version(version.clone());
        }
        if self.is_flat() {
            return root;
        }
        root.subcommand_required(true)
            .arg_required_else_help(true)
            .subcommands(self.commands.iter().map(CommandSpec::to_clap))
    }

    /// Parses `argv` without running any action.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::CliParsing`] when `clap` rejects the input,
    /// including requests for help or version output.
    pub fn parse_from<I, T>(&self, argv: I) -> CliveResult<ArgMatches>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(self.clap_command().try_get_matches_from(argv)?)
    }

    /// Parses `argv` and runs the selected command's action.
    ///
    /// A flat application runs its root action with the root matches. A
    /// multi-command application runs the chosen subcommand's action with
    /// that subcommand's matches. Commands without an action do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::CliParsing`] when parsing fails and
    /// [`CliveError::Action`] when the action reports an error.
    pub fn run_from<I, T>(&self, argv: I) -> CliveResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.parse_from(argv)?;
        self.dispatch(&matches)
    }

    /// Parses the process arguments and runs the selected action.
    ///
    /// # Errors
    ///
    /// See [`App::run_from`].
    pub fn run(&self) -> CliveResult<()> {
        self.run_from(std::env::args_os())
    }

    fn dispatch(&self, matches: &ArgMatches) -> CliveResult<()> {
        let (command, action, matches) = if self.is_flat() {
            (self.name.as_str(), self.action.as_ref(), matches)
        } else {
            let Some((name, sub_matches)) = matches.subcommand() else {
                return Ok(());
            };
            let action = self.subcommand(name).and_then(|cmd| cmd.action.as_ref());
            (name, action, sub_matches)
        };
        let Some(action) = action else {
            tracing::debug!(command, "command has no action");
            return Ok(());
        };
        tracing::debug!(command, "running action");
        action.call(matches).map_err(|source| CliveError::Action {
            command: command.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests;
