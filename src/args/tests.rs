use std::time::Duration;

use clap::Parser;

use super::cli::{Command, HarnessArgs};
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64};
use super::types::{HttpMethod, HttpVersion};
use crate::error::ValidationError;

#[test]
fn parse_header_splits_on_first_colon() -> Result<(), String> {
    let parsed = parse_header("X-Token: abc:def").map_err(|err| err.to_string())?;
    assert_eq!(parsed, ("X-Token".to_owned(), "abc:def".to_owned()));
    Ok(())
}

#[test]
fn parse_header_rejects_missing_colon() {
    assert!(matches!(
        parse_header("NoColonHere"),
        Err(ValidationError::InvalidHeaderFormat { .. })
    ));
}

#[test]
fn parse_header_rejects_empty_name() {
    assert!(matches!(
        parse_header(": value"),
        Err(ValidationError::InvalidHeaderFormat { .. })
    ));
}

#[test]
fn parse_positive_rejects_zero() {
    assert!(parse_positive_u64("0").is_err());
    assert_eq!(parse_positive_u64("7"), Ok(7));
}

#[test]
fn parse_duration_supports_units_and_bare_seconds() {
    assert_eq!(parse_duration_arg("500ms"), Ok(Duration::from_millis(500)));
    assert_eq!(parse_duration_arg("10s"), Ok(Duration::from_secs(10)));
    assert_eq!(parse_duration_arg("2m"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration_arg("3"), Ok(Duration::from_secs(3)));
    assert!(parse_duration_arg("5parsecs").is_err());
}

#[test]
fn run_subcommand_parses_core_options() -> Result<(), String> {
    let parsed = HarnessArgs::try_parse_from([
        "loadmeter",
        "run",
        "--url",
        "http://localhost:8080/",
        "-X",
        "post",
        "--http-version",
        "2",
        "-H",
        "Accept: application/json",
        "-c",
        "8",
        "-n",
        "1000",
        "--insecure",
    ])
    .map_err(|err| err.to_string())?;

    let Command::Run(run) = parsed.command else {
        return Err("expected run subcommand".to_owned());
    };
    assert_eq!(run.method, HttpMethod::Post);
    assert_eq!(run.http_version, HttpVersion::V2);
    assert_eq!(run.clients, 8);
    assert_eq!(run.requests, 1000);
    assert!(run.insecure);
    assert_eq!(
        run.headers,
        vec![("Accept".to_owned(), "application/json".to_owned())]
    );
    Ok(())
}

#[test]
fn run_subcommand_defaults() -> Result<(), String> {
    let parsed = HarnessArgs::try_parse_from(["loadmeter", "run", "--url", "http://localhost/"])
        .map_err(|err| err.to_string())?;

    let Command::Run(run) = parsed.command else {
        return Err("expected run subcommand".to_owned());
    };
    assert_eq!(run.method, HttpMethod::Get);
    assert_eq!(run.http_version, HttpVersion::V1_1);
    assert_eq!(run.clients, 1);
    assert_eq!(run.requests, 100);
    assert_eq!(run.timeout, Duration::from_secs(10));
    assert!(!run.follow_redirects);
    assert!(!run.insecure);
    Ok(())
}

#[test]
fn run_subcommand_rejects_zero_clients() {
    let args =
        HarnessArgs::try_parse_from(["loadmeter", "run", "--url", "http://localhost/", "-c", "0"]);
    assert!(args.is_err());
}

#[test]
fn compare_subcommand_takes_two_paths() -> Result<(), String> {
    let parsed = HarnessArgs::try_parse_from(["loadmeter", "compare", "before.json", "after.json"])
        .map_err(|err| err.to_string())?;

    let Command::Compare(compare) = parsed.command else {
        return Err("expected compare subcommand".to_owned());
    };
    assert_eq!(compare.left, "before.json");
    assert_eq!(compare.right, "after.json");
    Ok(())
}
