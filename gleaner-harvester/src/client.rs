use crate::error::{HarvestError, Result};
use crate::topics::normalize_topic;
use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, HeaderMap, HeaderValue, ORIGIN,
    UPGRADE_INSECURE_REQUESTS,
};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// The forum rejects plainly non-browser clients, so every page fetch carries
// a fixed browser-like header set.
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "de-DE,de;q=0.8,en-US;q=0.6,en;q=0.4";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/48.0.2564.97 Safari/537.36";

/// Configuration shared by the harvesting components.
#[derive(Debug, Clone)]
pub struct HarvesterConfig {
    /// Root URL of the Q&A forum whose topics are harvested.
    pub forum_url: String,
    /// Root URL of the monthly-archive source.
    pub archive_url: String,
    /// Directory holding the per-topic store files and archive exports.
    pub data_dir: PathBuf,
    /// Session cookie sent with topic-page fetches; empty disables the header.
    pub session_cookie: String,
    pub timeout_secs: u64,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            forum_url: "https://www.quora.com".to_string(),
            archive_url: "https://medium.com".to_string(),
            data_dir: PathBuf::from("training-data"),
            session_cookie: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Build the shared HTTP client. Construction only fails on TLS backend
/// misconfiguration, which is unrecoverable anyway.
pub fn build_client(config: &HarvesterConfig) -> Client {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs / 2))
        .gzip(true)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .expect("Failed to create HTTP client")
}

/// Header set for topic landing pages and answer pages.
pub fn browser_headers(config: &HarvesterConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    if !config.session_cookie.is_empty()
        && let Ok(cookie) = HeaderValue::from_str(&config.session_cookie)
    {
        headers.insert(COOKIE, cookie);
    }
    headers
}

/// Header set for the archive's JSON endpoints.
pub fn archive_headers(config: &HarvesterConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("x-xsrf-token", HeaderValue::from_static("1"));
    if let Ok(origin) = HeaderValue::from_str(&config.archive_url) {
        headers.insert(ORIGIN, origin);
    }
    headers
}

pub fn topic_page_url(config: &HarvesterConfig, topic: &str) -> Result<Url> {
    let mut url = parse_root(&config.forum_url)?;
    url.set_path(&format!("/topic/{}", normalize_topic(topic)));
    Ok(url)
}

pub fn topic_feed_url(config: &HarvesterConfig, topic: &str) -> Result<Url> {
    let mut url = parse_root(&config.forum_url)?;
    url.set_path(&format!("/topic/{}/rss", normalize_topic(topic)));
    Ok(url)
}

fn parse_root(root: &str) -> Result<Url> {
    Url::parse(root).map_err(|e| HarvestError::InvalidUrl(format!("Invalid root URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_page_url() {
        let config = HarvesterConfig::default();
        let url = topic_page_url(&config, "Physics").unwrap();
        assert_eq!(url.as_str(), "https://www.quora.com/topic/Physics");
    }

    #[test]
    fn test_topic_feed_url_normalizes_spaces() {
        let config = HarvesterConfig::default();
        let url = topic_feed_url(&config, "Quantum Mechanics").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.quora.com/topic/Quantum-Mechanics/rss"
        );
    }

    #[test]
    fn test_invalid_root_url() {
        let config = HarvesterConfig {
            forum_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(topic_page_url(&config, "Physics").is_err());
    }

    #[test]
    fn test_browser_headers_without_cookie() {
        let config = HarvesterConfig::default();
        let headers = browser_headers(&config);
        assert!(!headers.contains_key(COOKIE));
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "max-age=0");
    }

    #[test]
    fn test_browser_headers_with_cookie() {
        let config = HarvesterConfig {
            session_cookie: "m-s=abc123".to_string(),
            ..Default::default()
        };
        let headers = browser_headers(&config);
        assert_eq!(headers.get(COOKIE).unwrap(), "m-s=abc123");
    }
}
