//! Rendering synthesized flags as `clap` arguments.

use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use clap::builder::{BoolishValueParser, FalseyValueParser};
use clap::{Arg, ArgAction, value_parser};

use super::coerce::{join_list, split_list};
use super::{FlagKind, FlagSpec};
use crate::literal::{format_duration, parse_duration};
use crate::value::Value;

impl FlagSpec {
    /// Builds the `clap` argument for this flag.
    ///
    /// Every flag is a long option bound to its environment variable. Lists
    /// accept repeated occurrences, each split on commas not preceded by a
    /// backslash, so every occurrence is stored as one `Vec`. An inverted
    /// boolean takes an optional `=false`/`=true` and reads as `true` when
    /// absent.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .env(self.env.clone())
            .help(self.usage.clone())
            .hide(self.hidden);

        let arg = match self.kind {
            FlagKind::Int => arg.value_parser(value_parser!(i32)).allow_negative_numbers(true),
            FlagKind::Int64 => arg.value_parser(value_parser!(i64)).allow_negative_numbers(true),
            FlagKind::Uint => arg.value_parser(value_parser!(u32)),
            FlagKind::Uint64 => arg.value_parser(value_parser!(u64)),
            FlagKind::Float32 => arg
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true),
            FlagKind::Float64 => arg
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
            FlagKind::Bool => arg
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new()),
            FlagKind::BoolTrue => arg
                .action(ArgAction::Set)
                .value_parser(BoolishValueParser::new())
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            FlagKind::String => arg.action(ArgAction::Set),
            FlagKind::Duration => arg.value_parser(parse_duration),
            FlagKind::IntList => list(arg)
                .value_parser(number_list::<i32>)
                .allow_negative_numbers(true),
            FlagKind::Int64List => list(arg)
                .value_parser(number_list::<i64>)
                .allow_negative_numbers(true),
            FlagKind::StringList => list(arg).value_parser(string_list),
        };

        match self.default_literal() {
            Some(literal) => arg.default_value(literal),
            None => arg,
        }
    }

    /// Default rendered as the raw value `clap` parses at startup.
    fn default_literal(&self) -> Option<String> {
        let literal = match self.default.as_ref()? {
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::U32(v) => v.to_string(),
            Value::U64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            // `SetTrue` already reads as `false` when absent.
            Value::Bool(false) => return None,
            Value::Bool(true) => String::from("true"),
            Value::String(v) if v.is_empty() => return None,
            Value::String(v) => v.clone(),
            Value::Duration(v) => format_duration(*v),
            Value::I32List(v) => join_list(v),
            Value::I64List(v) => join_list(v),
            Value::StringList(v) => join_list(v),
        };
        Some(literal)
    }
}

fn list(arg: Arg) -> Arg {
    arg.action(ArgAction::Append).num_args(0..=1)
}

/// Parses one list occurrence; `--flag=` yields no elements.
fn string_list(raw: &str) -> Result<Vec<String>, Infallible> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(split_list(raw))
}

fn number_list<T>(raw: &str) -> Result<Vec<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    split_list(raw)
        .iter()
        .map(|element| {
            element
                .trim()
                .parse()
                .map_err(|err| format!("invalid list element '{element}': {err}"))
        })
        .collect()
}
