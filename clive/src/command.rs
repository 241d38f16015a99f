//! Command synthesis from a single record.

use std::collections::HashMap;

use clap::Command;

use crate::error::{CliveError, CliveResult};
use crate::flag::FlagSpec;
use crate::marker::Action;
use crate::meta::Metadata;
use crate::naming::is_flag_field;
use crate::record::{FieldType, Record};

/// Long flag `clap` adds to every command.
const HELP_FLAG: &str = "help";

/// A synthesized command: name, usage, flags and optional action.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command name, the record type's name lowercased.
    pub name: String,
    /// Usage text taken from the command marker's annotation.
    pub usage: String,
    /// Flags in field declaration order.
    pub flags: Vec<FlagSpec>,
    /// Action bound on the record's command marker.
    pub action: Option<Action>,
}

impl CommandSpec {
    /// Synthesizes the command described by `record`.
    ///
    /// The record must be named and must start with a
    /// [`crate::CommandMarker`] field. Every later field's annotation is
    /// validated, and each field whose name carries the
    /// [`crate::naming::FLAG_PREFIX`] becomes a flag.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::AnonymousRecord`] for an unnamed record,
    /// [`CliveError::Structure`] when the marker is missing,
    /// [`CliveError::DuplicateFlag`] when two fields map to one flag name,
    /// [`CliveError::ReservedFlag`] for a flag named `help`, and any
    /// annotation or flag synthesis failure wrapped in [`CliveError::Field`].
    pub fn from_record(record: &dyn Record) -> CliveResult<Self> {
        let type_name = record.type_name();
        if type_name.is_empty() {
            return Err(CliveError::AnonymousRecord);
        }

        let fields = record.fields();
        let Some((first, rest)) = fields.split_first() else {
            return Err(CliveError::structure(type_name, "record has no fields"));
        };
        let marker = match (first.ty, record.marker()) {
            (FieldType::Command, Some(marker)) => marker,
            _ => {
                return Err(CliveError::structure(
                    type_name,
                    format!("first field must be a CommandMarker, found '{}'", first.name),
                ));
            }
        };
        let usage = Metadata::parse(first.tag)
            .map_err(|err| err.in_field(first.name))?
            .usage;

        let name = type_name.to_lowercase();
        let mut flags: Vec<FlagSpec> = Vec::new();
        let mut claimed: HashMap<String, &'static str> = HashMap::new();
        for field in rest {
            let meta = Metadata::parse(field.tag).map_err(|err| err.in_field(field.name))?;
            if !is_flag_field(field.name) {
                continue;
            }
            let flag = FlagSpec::synthesize(field, &meta).map_err(|err| err.in_field(field.name))?;
            if flag.name == HELP_FLAG {
                return Err(CliveError::ReservedFlag {
                    command: name,
                    flag: flag.name,
                    field: field.name.to_owned(),
                });
            }
            if let Some(first_field) = claimed.insert(flag.name.clone(), field.name) {
                return Err(CliveError::DuplicateFlag {
                    command: name,
                    flag: flag.name,
                    first: first_field.to_owned(),
                    second: field.name.to_owned(),
                });
            }
            flags.push(flag);
        }

        tracing::debug!(command = %name, flags = flags.len(), "synthesized command");
        Ok(Self {
            name,
            usage,
            flags,
            action: marker.action.clone(),
        })
    }

    /// Prepends `prefix` to every flag's environment variable.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.flags = self
            .flags
            .into_iter()
            .map(|flag| flag.with_env_prefix(prefix))
            .collect();
        self
    }

    /// Builds the `clap` subcommand for this command.
    #[must_use]
    pub fn to_clap(&self) -> Command {
        Command::new(self.name.clone())
            .about(self.usage.clone())
            .args(self.flags.iter().map(FlagSpec::to_arg))
    }
}
