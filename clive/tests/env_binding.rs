//! Flags fall back to their environment variables.
//!
//! These tests mutate process-wide state, so they hold the shared
//! environment lock and run serially.

use anyhow::{Result, ensure};
use clive::{App, CommandMarker, FromFlags, Record};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::env::EnvScope;

const PREFIX: &str = "CLIVE_ENV_TEST_";

#[derive(Debug, Default, Record)]
struct Worker {
    #[cli("usage:process the queue")]
    command: CommandMarker,
    #[cli("default:4")]
    flag_concurrency: u32,
    #[cli("default:true")]
    flag_retry: bool,
    flag_verbose: bool,
    flag_queues: Vec<String>,
    #[cli("name:batchSize,default:100")]
    flag_batch: u64,
}

#[fixture]
fn app() -> App {
    App::builder("worker")
        .env_prefix(PREFIX)
        .command(&Worker::default())
        .build_or_panic()
}

fn parse(app: &App, argv: &[&str]) -> Result<Worker> {
    let matches = app.parse_from(argv)?;
    Ok(Worker::default().from_matches(&matches)?)
}

#[rstest]
fn env_names_follow_flag_names(app: App) -> Result<()> {
    let envs: Vec<&str> = app.flags.iter().map(|f| f.env.as_str()).collect();
    ensure!(
        envs == [
            "CLIVE_ENV_TEST_CONCURRENCY",
            "CLIVE_ENV_TEST_RETRY",
            "CLIVE_ENV_TEST_VERBOSE",
            "CLIVE_ENV_TEST_QUEUES",
            "CLIVE_ENV_TEST_BATCH_SIZE",
        ],
        "envs were {envs:?}"
    );
    Ok(())
}

#[rstest]
#[serial]
fn environment_fills_absent_flags(app: App) -> Result<()> {
    let _env = EnvScope::new()
        .clear_prefixed(PREFIX)
        .set("CLIVE_ENV_TEST_CONCURRENCY", "16")
        .set("CLIVE_ENV_TEST_VERBOSE", "true")
        .set("CLIVE_ENV_TEST_QUEUES", "high,low")
        .set("CLIVE_ENV_TEST_BATCH_SIZE", "250");
    let worker = parse(&app, &["worker"])?;
    ensure!(worker.flag_concurrency == 16);
    ensure!(worker.flag_verbose);
    ensure!(worker.flag_queues == ["high", "low"], "queues were {:?}", worker.flag_queues);
    ensure!(worker.flag_batch == 250);
    Ok(())
}

#[rstest]
#[serial]
fn command_line_beats_environment(app: App) -> Result<()> {
    let _env = EnvScope::new()
        .clear_prefixed(PREFIX)
        .set("CLIVE_ENV_TEST_CONCURRENCY", "16");
    let worker = parse(&app, &["worker", "--concurrency", "2"])?;
    ensure!(worker.flag_concurrency == 2);
    Ok(())
}

#[rstest]
#[serial]
fn environment_can_turn_off_inverted_booleans(app: App) -> Result<()> {
    let _env = EnvScope::new()
        .clear_prefixed(PREFIX)
        .set("CLIVE_ENV_TEST_RETRY", "false");
    ensure!(!parse(&app, &["worker"])?.flag_retry);
    Ok(())
}

#[rstest]
#[serial]
fn defaults_apply_without_environment(app: App) -> Result<()> {
    let _env = EnvScope::new().clear_prefixed(PREFIX);
    let worker = parse(&app, &["worker"])?;
    ensure!(worker.flag_concurrency == 4);
    ensure!(worker.flag_retry);
    ensure!(!worker.flag_verbose);
    ensure!(worker.flag_queues.is_empty());
    ensure!(worker.flag_batch == 100);
    Ok(())
}

#[rstest]
#[serial]
fn malformed_environment_values_are_parse_errors(app: App) {
    let _env = EnvScope::new()
        .clear_prefixed(PREFIX)
        .set("CLIVE_ENV_TEST_CONCURRENCY", "many");
    assert!(app.parse_from(["worker"]).is_err());
}
