//! Example task tracker built from two annotated records.
//!
//! Run with `cargo run --example taskctl -- add --title "write docs"` and set
//! `RUST_LOG=clive=debug` to watch command synthesis and dispatch.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::ArgMatches;
use clive::{ActionResult, App, CliveError, CommandMarker, FromFlags, Record};
use tracing_subscriber::EnvFilter;

/// Options for the `add` subcommand.
#[derive(Debug, Default, Record)]
pub struct Add {
    #[cli("usage:add a task to the list")]
    command: CommandMarker,
    #[cli("usage:task title")]
    flag_title: String,
    #[cli("usage:'priority, 1 (low) to 5 (high)',default:3")]
    flag_priority: u32,
    #[cli("usage:labels to attach")]
    flag_label: Vec<String>,
    #[cli("name:dueIn,usage:time until the task is due,default:24h")]
    flag_due: Duration,
}

/// Options for the `list` subcommand.
#[derive(Debug, Default, Record)]
pub struct List {
    #[cli("usage:show tasks")]
    command: CommandMarker,
    #[cli("usage:include finished tasks")]
    flag_all: bool,
    #[cli("usage:group rows by label,default:true")]
    flag_grouped: bool,
    #[cli("usage:maximum rows,default:20")]
    flag_limit: i64,
}

fn describe_add(add: &Add) -> String {
    let labels = if add.flag_label.is_empty() {
        String::from("none")
    } else {
        add.flag_label.join(", ")
    };
    format!(
        "Adding {:?} (priority {}, labels: {labels}, due in {:?})",
        add.flag_title, add.flag_priority, add.flag_due
    )
}

fn describe_list(list: &List) -> String {
    let scope = if list.flag_all { "all" } else { "open" };
    let layout = if list.flag_grouped { "grouped" } else { "flat" };
    format!("Listing up to {} {scope} tasks, {layout}", list.flag_limit)
}

fn run_add(matches: &ArgMatches) -> ActionResult {
    let add = Add::default().from_matches(matches)?;
    write_line(&describe_add(&add))
}

fn run_list(matches: &ArgMatches) -> ActionResult {
    let list = List::default().from_matches(matches)?;
    write_line(&describe_list(&list))
}

fn write_line(message: &str) -> ActionResult {
    let mut stdout = io::stdout().lock();
    stdout.write_all(message.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn build_app(add: &Add, list: &List) -> Result<App, CliveError> {
    App::builder("taskctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tracks tasks from the command line")
        .env_prefix("TASKCTL_")
        .command(add)
        .command(list)
        .build()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clive=info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let add = Add {
        command: CommandMarker::with_action(run_add),
        ..Add::default()
    };
    let list = List {
        command: CommandMarker::with_action(run_list),
        ..List::default()
    };
    let result = build_app(&add, &list).and_then(|app| app.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliveError::CliParsing(err)) => err.exit(),
        Err(err) => {
            tracing::error!(error = %err, "taskctl failed");
            ExitCode::FAILURE
        }
    }
}
