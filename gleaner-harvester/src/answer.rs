use serde::{Deserialize, Serialize};

/// A harvested question/answer pair. Identity is the canonical `url`; the
/// feed-assigned `feed_id` is not stable across fetches and must never be
/// used as a dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub body: String,
    pub categories: Vec<String>,
    pub feed_id: String,
    pub url: String,
}

impl Answer {
    pub fn new(question: String, body: String, topic: String, feed_id: String, url: String) -> Self {
        Self {
            question,
            body,
            categories: vec![topic],
            feed_id,
            url,
        }
    }

    /// Append a label unless it is already present. The per-answer label
    /// cardinality is small, so a linear scan beats a hash set here.
    pub fn add_category(&mut self, label: &str) {
        if !self.categories.iter().any(|c| c == label) {
            self.categories.push(label.to_string());
        }
    }

    /// Answers holding more than one label have been enriched already and
    /// are not worth another page fetch.
    pub fn needs_enrichment(&self) -> bool {
        self.categories.len() <= 1
    }
}
