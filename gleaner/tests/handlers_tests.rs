use chrono::NaiveDate;
use gleaner::handlers::*;
use std::path::PathBuf;

#[test]
fn test_expand_data_dir_plain() {
    assert_eq!(expand_data_dir("training-data"), PathBuf::from("training-data"));
}

#[test]
fn test_expand_data_dir_tilde() {
    let expanded = expand_data_dir("~/corpus");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.to_string_lossy().ends_with("corpus"));
}

#[test]
fn test_parse_root_url_valid() {
    let result = parse_root_url("https://forum.example.com");
    assert_eq!(result.unwrap(), "https://forum.example.com/");
}

#[test]
fn test_parse_root_url_invalid() {
    assert!(parse_root_url("not a url").is_err());
}

#[test]
fn test_parse_root_url_without_host() {
    assert!(parse_root_url("file:///tmp/forum").is_err());
}

#[test]
fn test_parse_month_arg() {
    assert_eq!(parse_month_arg("2016-02").unwrap(), "february-2016");
}

#[test]
fn test_parse_month_arg_rejects_garbage() {
    assert!(parse_month_arg("soon").is_err());
    assert!(parse_month_arg("2016-13").is_err());
    assert!(parse_month_arg("2016").is_err());
}

#[test]
fn test_parse_since_arg_expands_months() {
    let now = NaiveDate::from_ymd_opt(2016, 2, 10).unwrap();
    let months = parse_since_arg("2015-12", now).unwrap();
    assert_eq!(months, vec!["december-2015", "january-2016", "february-2016"]);
}

#[test]
fn test_parse_since_arg_rejects_future() {
    let now = NaiveDate::from_ymd_opt(2016, 2, 10).unwrap();
    assert!(parse_since_arg("2016-03", now).is_err());
}

#[test]
fn test_seed_override() {
    assert_eq!(seed_override(vec![]), None);
    assert_eq!(
        seed_override(vec!["Physics".to_string()]),
        Some(vec!["Physics".to_string()])
    );
}
