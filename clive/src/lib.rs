//! Declarative command-line interfaces generated from annotated structs.
//!
//! A struct deriving [`Record`] describes one command. Its first field is a
//! [`CommandMarker`] whose annotation carries the command's usage text; every
//! field whose name starts with `flag_` becomes a long option bound to an
//! environment variable. Annotations are compact strings:
//!
//! ```text
//! #[cli("name:bindAddr,usage:'where to listen, host:port',hidden:false,default:0.0.0.0:80")]
//! ```
//!
//! [`AppBuilder`] turns one or more records into an [`App`] backed by `clap`.
//! A single record yields a flat tool; several records yield subcommands.
//! Inside an action, [`extract`] (or [`FromFlags::from_matches`]) reads the
//! parsed values back into a fresh instance of the record.
//!
//! ```
//! use std::time::Duration;
//! use clive::{App, CommandMarker, FromFlags, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Fetch {
//!     #[cli("usage:download a URL")]
//!     command: CommandMarker,
//!     #[cli("usage:request timeout,default:30s")]
//!     flag_timeout: Duration,
//!     #[cli("usage:retry budget,default:3")]
//!     flag_retries: u32,
//!     #[cli("usage:extra headers")]
//!     flag_header: Vec<String>,
//! }
//!
//! let app = App::builder("fetch")
//!     .env_prefix("CLIVE_DOC_FETCH_")
//!     .command(&Fetch::default())
//!     .build()?;
//! let matches = app.parse_from(["fetch", "--retries", "5", "--header", "a:1,b:2"])?;
//! let fetch = Fetch::default().from_matches(&matches)?;
//! assert_eq!(fetch.flag_timeout, Duration::from_secs(30));
//! assert_eq!(fetch.flag_retries, 5);
//! assert_eq!(fetch.flag_header, ["a:1", "b:2"]);
//! # Ok::<(), clive::CliveError>(())
//! ```

pub use clive_macros::Record;

mod app;
mod command;
mod error;
mod extract;
mod flag;
mod literal;
mod marker;
mod meta;
pub mod naming;
mod record;
mod value;

#[cfg(test)]
mod test_support;

pub use app::{App, AppBuilder};
pub use command::CommandSpec;
pub use error::{ActionError, CliveError, CliveResult, is_display_request};
pub use extract::extract;
pub use flag::{FlagKind, FlagSpec};
pub use literal::parse_duration;
pub use marker::{Action, ActionResult, CommandMarker};
pub use meta::Metadata;
pub use record::{FieldDescriptor, FieldKind, FieldType, FromFlags, Record};
pub use value::{FlagValues, FromValue, Value};
