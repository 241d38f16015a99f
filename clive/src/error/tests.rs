//! Unit tests for error classification and wrapping.

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::{CliveError, is_display_request};

fn build_error(kind: ErrorKind) -> clap::Error {
    Command::new("demo").error(kind, "demo output")
}

#[rstest]
#[case(ErrorKind::DisplayHelp)]
#[case(ErrorKind::DisplayVersion)]
#[case(ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand)]
fn recognises_display_requests(#[case] kind: ErrorKind) {
    let err = build_error(kind);
    assert!(is_display_request(&err));
}

#[rstest]
#[case(ErrorKind::UnknownArgument)]
#[case(ErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ErrorKind) {
    let err = build_error(kind);
    assert!(!is_display_request(&err));
}

#[test]
fn field_wrapper_names_field_and_keeps_cause() {
    let err = CliveError::unsupported_type("char")
        .in_field("flag_separator")
        .in_field("outer");
    let rendered = err.to_string();
    assert!(rendered.contains("outer"), "missing outer field: {rendered}");
    assert!(
        matches!(err.root_cause(), CliveError::UnsupportedType { type_name } if type_name == "char"),
        "unexpected root cause: {err:?}"
    );
}

#[test]
fn clap_errors_convert_into_cli_parsing() {
    let err: CliveError = build_error(ErrorKind::UnknownArgument).into();
    assert!(matches!(err, CliveError::CliParsing(_)));
}
