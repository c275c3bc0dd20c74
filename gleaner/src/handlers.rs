use chrono::NaiveDate;
use gleaner_core::archive::{month_segment, months_between};
use std::path::PathBuf;
use url::Url;

// Helper functions for the subcommand handlers

/// Expand `~` in a data-dir argument into the user's home directory.
pub fn expand_data_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Validate a root-URL override before it reaches the engine.
pub fn parse_root_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;
    if url.host_str().is_none() {
        return Err(format!("URL '{}' has no host", raw));
    }
    Ok(url.to_string())
}

/// Parse a `YYYY-MM` argument into the archive's month segment.
pub fn parse_month_arg(raw: &str) -> Result<String, String> {
    Ok(month_segment(parse_year_month(raw)?))
}

/// Parse a `YYYY-MM` argument and expand it into every month segment from
/// there through `now`.
pub fn parse_since_arg(raw: &str, now: NaiveDate) -> Result<Vec<String>, String> {
    let since = parse_year_month(raw)?;
    let months = months_between(since, now);
    if months.is_empty() {
        return Err(format!("'{}' lies in the future", raw));
    }
    Ok(months)
}

fn parse_year_month(raw: &str) -> Result<NaiveDate, String> {
    let mut parts = raw.splitn(2, '-');
    let year: i32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", raw))?;
    let month: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", raw))?;

    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", raw))
}

/// Turn repeated `--seed` values into the engine's seed override; no values
/// means the built-in seed set stays in place.
pub fn seed_override(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}
