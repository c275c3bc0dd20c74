// Topic feed fetching and parsing

use crate::client::{HarvesterConfig, topic_feed_url};
use crate::error::Result;
use reqwest::Client;
use tracing::debug;

/// One feed entry, reduced to the fields the ingestor consumes.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub guid: String,
    pub link: String,
}

/// Fetch and parse a topic's feed. The feed is a bounded document (the forum
/// caps it at roughly the newest 50 answers, with no pagination), so one GET
/// observes everything there is to observe for this topic.
pub async fn fetch_topic_feed(
    client: &Client,
    config: &HarvesterConfig,
    topic: &str,
) -> Result<Vec<FeedEntry>> {
    let url = topic_feed_url(config, topic)?;
    let bytes = client.get(url).send().await?.bytes().await?;
    let entries = parse_feed(&bytes)?;
    debug!("feed for {} holds {} entries", topic, entries.len());
    Ok(entries)
}

/// Parse a feed document into entries. Entries without a link carry no
/// stable identity and are dropped.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(bytes)?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone())?;
            Some(FeedEntry {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                description: entry.summary.map(|t| t.content).unwrap_or_default(),
                guid: entry.id,
                link,
            })
        })
        .collect();

    Ok(entries)
}
