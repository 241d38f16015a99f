//! Tests for application assembly and dispatch.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow, ensure};

use super::{App, AppBuilder};
use crate::error::CliveError;
use crate::marker::CommandMarker;
use crate::record::{FieldDescriptor, FieldKind, FieldType, Record};
use crate::test_support::{Manual, manual};

const SERVE: &[FieldDescriptor] = &[
    FieldDescriptor::new("command", FieldType::Command, "usage:run the server"),
    FieldDescriptor::new("flag_listen_port", FieldType::Flag(FieldKind::U32), "default:8080"),
    FieldDescriptor::new("flag_trace_requests", FieldType::Flag(FieldKind::Bool), ""),
];

const MIGRATE: &[FieldDescriptor] = &[
    FieldDescriptor::new("command", FieldType::Command, "usage:apply migrations"),
    FieldDescriptor::new("flag_dry_run", FieldType::Flag(FieldKind::Bool), ""),
];

const BROKEN: &[FieldDescriptor] = &[FieldDescriptor::new(
    "flag_port",
    FieldType::Flag(FieldKind::U32),
    "",
)];

fn recording(
    fields: &'static [FieldDescriptor],
    name: &'static str,
    log: &Arc<Mutex<Vec<String>>>,
) -> Manual {
    let log = Arc::clone(log);
    let mut record = manual(name, fields);
    record.marker = CommandMarker::with_action(move |matches| {
        let port = matches
            .try_get_one::<u32>("listen-port")
            .ok()
            .flatten()
            .copied();
        let mut entries = log.lock().map_err(|err| err.to_string())?;
        entries.push(format!("{name}:{port:?}"));
        Ok(())
    });
    record
}

#[test]
fn single_command_is_flattened() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let app = App::builder("demo").command(&serve).build()?;
    ensure!(app.is_flat());
    ensure!(app.usage == "run the server");
    let names: Vec<&str> = app.flags.iter().map(|f| f.name.as_str()).collect();
    ensure!(names == ["listen-port", "trace-requests"], "root flags were {names:?}");
    ensure!(app.commands.is_empty());

    let cmd = app.clap_command();
    ensure!(cmd.get_subcommands().next().is_none(), "flat app exposes subcommands");
    Ok(())
}

#[test]
fn several_commands_become_subcommands() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let migrate = manual("Migrate", MIGRATE);
    let app = AppBuilder::new("demo")
        .about("demo tool")
        .commands([&serve as &dyn Record, &migrate])
        .build()?;
    ensure!(!app.is_flat());
    ensure!(app.flags.is_empty() && app.action.is_none());
    ensure!(app.usage == "demo tool");
    let names: Vec<&str> = app.commands.iter().map(|c| c.name.as_str()).collect();
    ensure!(names == ["serve", "migrate"], "subcommands were {names:?}");
    ensure!(app.subcommand("migrate").is_some_and(|c| c.usage == "apply migrations"));
    Ok(())
}

#[test]
fn first_failure_aborts_build() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let broken = manual("Broken", BROKEN);
    let anonymous = manual("", SERVE);
    let result = App::builder("demo")
        .command(&serve)
        .command(&broken)
        .command(&anonymous)
        .build();
    match result {
        Err(CliveError::Structure { record, .. }) => {
            ensure!(record == "Broken");
            Ok(())
        }
        other => Err(anyhow!("expected Structure, got {other:?}")),
    }
}

#[test]
fn commands_sharing_a_name_are_rejected() -> Result<()> {
    let upper = manual("Serve", SERVE);
    let lower = manual("serve", MIGRATE);
    match App::builder("demo").command(&upper).command(&lower).build() {
        Err(CliveError::DuplicateCommand { command, first, second }) => {
            ensure!(command == "serve" && first == "Serve" && second == "serve");
            Ok(())
        }
        other => Err(anyhow!("expected DuplicateCommand, got {other:?}")),
    }
}

const VERSIONED: &[FieldDescriptor] = &[
    FieldDescriptor::new("command", FieldType::Command, ""),
    FieldDescriptor::new("flag_version", FieldType::Flag(FieldKind::String), ""),
];

#[test]
fn version_flag_is_reserved_only_beside_an_app_version() -> Result<()> {
    let release = manual("Release", VERSIONED);
    match App::builder("demo").version("1.0.0").command(&release).build() {
        Err(CliveError::ReservedFlag { command, flag, field }) => {
            ensure!(command == "release" && flag == "version" && field == "flag_version");
        }
        other => return Err(anyhow!("expected ReservedFlag, got {other:?}")),
    }

    let unversioned = App::builder("demo").command(&release).build()?;
    ensure!(unversioned.parse_from(["demo", "--version", "2"]).is_ok());

    let migrate = manual("Migrate", MIGRATE);
    let nested = App::builder("demo")
        .version("1.0.0")
        .command(&release)
        .command(&migrate)
        .build()?;
    ensure!(nested.parse_from(["demo", "release", "--version", "2"]).is_ok());
    Ok(())
}

#[test]
fn empty_builder_is_rejected() {
    assert!(matches!(
        App::builder("demo").build(),
        Err(CliveError::InvalidArgument { .. })
    ));
}

#[test]
#[should_panic(expected = "failed to build command-line application")]
fn build_or_panic_panics_on_broken_records() {
    let broken = manual("Broken", BROKEN);
    let _ = App::builder("demo").command(&broken).build_or_panic();
}

#[test]
fn env_prefix_applies_to_every_flag() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let app = App::builder("demo").env_prefix("DEMO_").command(&serve).build()?;
    let envs: Vec<&str> = app.flags.iter().map(|f| f.env.as_str()).collect();
    ensure!(envs == ["DEMO_LISTEN_PORT", "DEMO_TRACE_REQUESTS"], "envs were {envs:?}");
    Ok(())
}

#[test]
fn flat_app_runs_root_action() -> Result<()> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let serve = recording(SERVE, "Serve", &log);
    let app = App::builder("demo").command(&serve).build()?;
    app.run_from(["demo", "--listen-port", "9000"])?;
    let entries = log.lock().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(*entries == ["Serve:Some(9000)"], "log was {entries:?}");
    Ok(())
}

#[test]
fn multi_app_runs_selected_subcommand() -> Result<()> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let serve = recording(SERVE, "Serve", &log);
    let migrate = recording(MIGRATE, "Migrate", &log);
    let app = App::builder("demo").command(&serve).command(&migrate).build()?;
    app.run_from(["demo", "serve"])?;
    app.run_from(["demo", "migrate", "--dry-run"])?;
    let entries = log.lock().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        *entries == ["Serve:Some(8080)", "Migrate:None"],
        "log was {entries:?}"
    );
    Ok(())
}

#[test]
fn multi_app_requires_a_subcommand() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let migrate = manual("Migrate", MIGRATE);
    let app = App::builder("demo").command(&serve).command(&migrate).build()?;
    match app.run_from(["demo"]) {
        Err(CliveError::CliParsing(err)) => {
            ensure!(crate::is_display_request(&err), "unexpected kind {:?}", err.kind());
            Ok(())
        }
        other => Err(anyhow!("expected CliParsing, got {other:?}")),
    }
}

#[test]
fn subcommand_flags_are_not_root_flags() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let migrate = manual("Migrate", MIGRATE);
    let app = App::builder("demo").command(&serve).command(&migrate).build()?;
    ensure!(app.parse_from(["demo", "--listen-port", "1", "serve"]).is_err());
    Ok(())
}

#[test]
fn action_errors_name_the_command() -> Result<()> {
    let mut serve = manual("Serve", SERVE);
    serve.marker = CommandMarker::with_action(|_| Err("boom".into()));
    let app = App::builder("demo").command(&serve).build()?;
    match app.run_from(["demo"]) {
        Err(CliveError::Action { command, source }) => {
            ensure!(command == "demo" && source.to_string() == "boom");
            Ok(())
        }
        other => Err(anyhow!("expected Action, got {other:?}")),
    }
}

#[test]
fn commands_without_actions_are_no_ops() -> Result<()> {
    let serve = manual("Serve", SERVE);
    let app = App::builder("demo").command(&serve).build()?;
    app.run_from(["demo", "--trace-requests"])?;
    Ok(())
}
