//! Reading parsed flag values back into records.

use std::time::Duration;

use clap::ArgMatches;

use crate::error::{CliveError, CliveResult};
use crate::flag::field_kind;
use crate::meta::Metadata;
use crate::naming::{flag_name, is_flag_field};
use crate::record::{FieldKind, FromFlags};
use crate::value::{FlagValues, Value};

/// Builds a new `T` from the values in `matches`.
///
/// `template` is only used as a type witness and is never modified. For each
/// flag field the flag name is derived exactly as during synthesis and the
/// value of the matching kind is read; flags that are absent and have no
/// default read as their kind's zero value.
///
/// # Errors
///
/// Returns [`CliveError::InvalidArgument`] when `template` is `None`. Field
/// failures (a malformed annotation, an unsupported type, or a lookup the
/// matches cannot answer) are wrapped in [`CliveError::Field`].
///
/// # Examples
///
/// ```
/// use clive::{App, CommandMarker, Record, extract};
///
/// #[derive(Debug, Default, Record)]
/// struct Greet {
///     #[cli("usage:say hello")]
///     command: CommandMarker,
///     #[cli("default:world")]
///     flag_target: String,
/// }
///
/// let app = App::builder("greet")
///     .env_prefix("CLIVE_DOC_GREET_")
///     .command(&Greet::default())
///     .build()?;
/// let matches = app.parse_from(["greet", "--target", "moon"])?;
/// let greet = extract(Some(&Greet::default()), &matches)?;
/// assert_eq!(greet.flag_target, "moon");
/// # Ok::<(), clive::CliveError>(())
/// ```
pub fn extract<T: FromFlags>(template: Option<&T>, matches: &ArgMatches) -> CliveResult<T> {
    let Some(template) = template else {
        return Err(CliveError::invalid_argument("record template is missing"));
    };

    let mut values = FlagValues::new();
    for field in template
        .fields()
        .iter()
        .filter(|field| is_flag_field(field.name))
    {
        let value = Metadata::parse(field.tag)
            .and_then(|meta| {
                let kind = field_kind(field)?;
                let name = flag_name(field.name, meta.name_override());
                read_value(matches, &name, kind)
            })
            .map_err(|err| err.in_field(field.name))?;
        tracing::trace!(field = field.name, ?value, "extracted flag value");
        values.insert(field.name, value);
    }
    T::assemble(values)
}

/// Reads the value of flag `name` as `kind`.
fn read_value(matches: &ArgMatches, name: &str, kind: FieldKind) -> CliveResult<Value> {
    let value = match kind {
        FieldKind::I32 => Value::I32(one(matches, name)?),
        FieldKind::I64 => Value::I64(one(matches, name)?),
        FieldKind::U32 => Value::U32(one(matches, name)?),
        FieldKind::U64 => Value::U64(one(matches, name)?),
        FieldKind::F32 => Value::F32(one(matches, name)?),
        FieldKind::F64 => Value::F64(one(matches, name)?),
        FieldKind::Bool => Value::Bool(one(matches, name)?),
        FieldKind::String => Value::String(one(matches, name)?),
        FieldKind::Duration => Value::Duration(one::<Duration>(matches, name)?),
        FieldKind::I32List => Value::I32List(many(matches, name)?),
        FieldKind::I64List => Value::I64List(many(matches, name)?),
        FieldKind::StringList => Value::StringList(many(matches, name)?),
    };
    Ok(value)
}

fn one<T>(matches: &ArgMatches, name: &str) -> CliveResult<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    matches
        .try_get_one::<T>(name)
        .map(|value| value.cloned().unwrap_or_default())
        .map_err(|source| CliveError::Lookup {
            flag: name.to_owned(),
            source,
        })
}

/// Flattens the per-occurrence lists of a list flag.
fn many<T>(matches: &ArgMatches, name: &str) -> CliveResult<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .try_get_many::<Vec<T>>(name)
        .map(|values| {
            values
                .map(|occurrences| occurrences.flatten().cloned().collect())
                .unwrap_or_default()
        })
        .map_err(|source| CliveError::Lookup {
            flag: name.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::marker::CommandMarker;
    use crate::record::{FieldDescriptor, FieldType, Record};
    use anyhow::{Result, anyhow, ensure};

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::new("command", FieldType::Command, ""),
        FieldDescriptor::new("flag_batch_size", FieldType::Flag(FieldKind::U64), "default:64"),
        FieldDescriptor::new("flag_job_name", FieldType::Flag(FieldKind::String), "name:jobLabel"),
        FieldDescriptor::new("notes", FieldType::Other("Notes"), ""),
    ];

    #[derive(Debug, Default)]
    struct Batch {
        command: CommandMarker,
        flag_batch_size: u64,
        flag_job_name: String,
        notes: Vec<u8>,
    }

    impl Record for Batch {
        fn type_name(&self) -> &'static str {
            "Batch"
        }

        fn fields(&self) -> &'static [FieldDescriptor] {
            FIELDS
        }

        fn marker(&self) -> Option<&CommandMarker> {
            Some(&self.command)
        }
    }

    impl FromFlags for Batch {
        fn assemble(mut values: FlagValues) -> CliveResult<Self> {
            Ok(Self {
                flag_batch_size: values.take("flag_batch_size")?,
                flag_job_name: values.take("flag_job_name")?,
                ..Self::default()
            })
        }
    }

    fn matches(argv: &[&str]) -> Result<ArgMatches> {
        let app = App::builder("batch")
            .env_prefix("CLIVE_EXTRACT_")
            .command(&Batch::default())
            .build()?;
        Ok(app.parse_from(std::iter::once("batch").chain(argv.iter().copied()))?)
    }

    #[test]
    fn reads_values_using_derived_names() -> Result<()> {
        let m = matches(&["--job-label", "nightly"])?;
        let batch = extract(Some(&Batch::default()), &m)?;
        ensure!(batch.flag_batch_size == 64, "default not applied: {batch:?}");
        ensure!(batch.flag_job_name == "nightly");
        Ok(())
    }

    #[test]
    fn absent_flags_without_default_read_as_zero() -> Result<()> {
        let batch = extract(Some(&Batch::default()), &matches(&[])?)?;
        ensure!(batch.flag_job_name.is_empty());
        Ok(())
    }

    #[test]
    fn template_is_left_untouched() -> Result<()> {
        let template = Batch {
            notes: vec![1, 2, 3],
            ..Batch::default()
        };
        let batch = template.from_matches(&matches(&["--batch-size", "7"])?)?;
        ensure!(batch.flag_batch_size == 7);
        ensure!(batch.notes.is_empty(), "non-flag fields start from default");
        ensure!(template.notes == [1, 2, 3] && template.flag_batch_size == 0);
        Ok(())
    }

    #[test]
    fn missing_template_is_rejected() -> Result<()> {
        match extract::<Batch>(None, &matches(&[])?) {
            Err(CliveError::InvalidArgument { .. }) => Ok(()),
            other => Err(anyhow!("expected InvalidArgument, got {other:?}")),
        }
    }

    // clap only reports unknown ids in debug builds.
    #[cfg(debug_assertions)]
    #[test]
    fn foreign_matches_fail_with_lookup_error() -> Result<()> {
        let foreign = clap::Command::new("other").try_get_matches_from(["other"])?;
        match extract(Some(&Batch::default()), &foreign) {
            Err(CliveError::Field { field, source }) => {
                ensure!(field == "flag_batch_size");
                ensure!(matches!(*source, CliveError::Lookup { .. }));
                Ok(())
            }
            other => Err(anyhow!("expected Field, got {other:?}")),
        }
    }
}
