// Topic-label enrichment scraped from answer pages

use crate::answer::Answer;
use crate::client::{HarvesterConfig, browser_headers};
use crate::error::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

// The forum marks topic labels with this exact class attribute; a looser
// class match would also hit unrelated navigation spans.
const TOPIC_SPAN_SELECTOR: &str = r#"span[class="TopicNameSpan TopicName"]"#;

/// Normalize a topic label into its URL-safe identifier form.
pub fn normalize_topic(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Fetch an answer's own page and append any topic labels found there.
/// Answers that already carry more than one label are left alone; a page
/// without labels leaves the answer unchanged.
pub async fn enrich_answer(
    client: &Client,
    config: &HarvesterConfig,
    answer: &mut Answer,
) -> Result<()> {
    if !answer.needs_enrichment() {
        return Ok(());
    }

    let body = client
        .get(&answer.url)
        .headers(browser_headers(config))
        .send()
        .await?
        .text()
        .await?;

    let labels = extract_topic_labels(&body);
    debug!("{} labels on {}", labels.len(), answer.url);
    for label in labels {
        answer.add_category(&label);
    }
    Ok(())
}

/// Collect the normalized text of every topic marker element in the page.
pub fn extract_topic_labels(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(TOPIC_SPAN_SELECTOR).unwrap();

    document
        .select(&selector)
        .map(|element| normalize_topic(&element.text().collect::<String>()))
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_topic_spaces() {
        assert_eq!(normalize_topic("Quantum Mechanics"), "Quantum-Mechanics");
    }

    #[test]
    fn test_normalize_topic_preserves_every_separator() {
        assert_eq!(normalize_topic("a  b"), "a--b");
    }

    #[test]
    fn test_extract_topic_labels() {
        let html = r#"
            <html><body>
                <span class="TopicNameSpan TopicName">Physics</span>
                <span class="TopicNameSpan TopicName">Particle Physics</span>
                <span class="TopicName">Not This One</span>
            </body></html>
        "#;
        let labels = extract_topic_labels(html);
        assert_eq!(labels, vec!["Physics", "Particle-Physics"]);
    }

    #[test]
    fn test_extract_topic_labels_none() {
        let html = "<html><body><p>plain page</p></body></html>";
        assert!(extract_topic_labels(html).is_empty());
    }
}
