// Follower-count scoring used to prioritize the discovery frontier

use crate::client::{HarvesterConfig, browser_headers, topic_page_url};
use crate::error::Result;
use reqwest::Client;
use tracing::debug;

// Marker preceding the human-readable follower count in the topic page HTML.
const COUNT_MARKER: &str = "\"count\">";

/// Fetch a topic's landing page and scan it for the follower count. A page
/// without the marker scores 0 so the crawl degrades instead of aborting;
/// only transport failures are errors.
pub async fn follower_count(
    client: &Client,
    config: &HarvesterConfig,
    topic: &str,
) -> Result<u64> {
    let url = topic_page_url(config, topic)?;
    let body = client
        .get(url)
        .headers(browser_headers(config))
        .send()
        .await?
        .text()
        .await?;

    let count = scan_follower_count(&body);
    debug!("{} has {} followers", topic, count);
    Ok(count)
}

fn scan_follower_count(body: &str) -> u64 {
    let Some(start) = body.find(COUNT_MARKER) else {
        return 0;
    };
    let rest = &body[start + COUNT_MARKER.len()..];
    let Some(end) = rest.find('<') else {
        return 0;
    };
    parse_short_count(&rest[..end])
}

/// Convert a human-readable count like "1.2m" or "340k" to an integer.
/// Anything unparsable counts as 0.
pub fn parse_short_count(raw: &str) -> u64 {
    let (digits, multiplier) = if let Some(stripped) = raw.strip_suffix('m') {
        (stripped, 1_000_000.0)
    } else if let Some(stripped) = raw.strip_suffix('k') {
        (stripped, 1_000.0)
    } else {
        (raw, 1.0)
    };

    let parsed: f64 = digits.trim().parse().unwrap_or(0.0);
    (multiplier * parsed) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_count_millions() {
        assert_eq!(parse_short_count("1.2m"), 1_200_000);
    }

    #[test]
    fn test_parse_short_count_thousands() {
        assert_eq!(parse_short_count("340k"), 340_000);
    }

    #[test]
    fn test_parse_short_count_plain() {
        assert_eq!(parse_short_count("57"), 57);
    }

    #[test]
    fn test_parse_short_count_empty() {
        assert_eq!(parse_short_count(""), 0);
    }

    #[test]
    fn test_parse_short_count_garbage() {
        assert_eq!(parse_short_count("garbage"), 0);
    }

    #[test]
    fn test_scan_follower_count_present() {
        let body = r#"<html><span class="count">2.5k</span> followers</html>"#;
        assert_eq!(scan_follower_count(body), 2_500);
    }

    #[test]
    fn test_scan_follower_count_marker_absent() {
        assert_eq!(scan_follower_count("<html><body>nothing here</body></html>"), 0);
    }

    #[test]
    fn test_scan_follower_count_unterminated() {
        assert_eq!(scan_follower_count(r#"trailing "count">42"#), 0);
    }
}
