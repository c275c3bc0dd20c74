// Deduplicating ingestion of topic feeds into the corpus store

use crate::answer::Answer;
use crate::client::{HarvesterConfig, build_client};
use crate::error::Result;
use crate::feed::fetch_topic_feed;
use crate::store::CorpusStore;
use crate::topics::{enrich_answer, normalize_topic};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Per-ingestion label tally: how many of the processed answers carry each
/// topic label. This is the enqueue-worthiness signal for discovery.
pub type TopicTally = HashMap<String, u32>;

/// Outcome of ingesting one topic.
#[derive(Debug)]
pub struct TopicIngest {
    /// The full merged answer set that was persisted.
    pub answers: Vec<Answer>,
    pub tally: TopicTally,
    /// Answers that were not in the store before this ingestion.
    pub new_count: usize,
}

/// Fetches a topic's feed and merges it into the persisted store without
/// duplicating or losing anything.
pub struct Ingestor {
    client: Client,
    config: HarvesterConfig,
    store: CorpusStore,
}

impl Ingestor {
    pub fn new(config: HarvesterConfig) -> Self {
        let client = build_client(&config);
        let store = CorpusStore::new(config.data_dir.clone());
        Self {
            client,
            config,
            store,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &HarvesterConfig {
        &self.config
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// One full ingestion pass: fetch the feed, append unseen entries to the
    /// persisted sequence, enrich labels, tally them, persist the merge.
    ///
    /// Pre-existing answers keep their position; new ones are appended, so
    /// the stored sequence only ever grows. Any transport or decode failure
    /// aborts the pass before the store is rewritten.
    pub async fn ingest_topic(&self, topic: &str) -> Result<TopicIngest> {
        let topic = normalize_topic(topic);
        let entries = fetch_topic_feed(&self.client, &self.config, &topic).await?;
        let mut answers = self.store.load(&topic).await?;

        // Membership is keyed by canonical URL; the feed's guid is reassigned
        // between fetches and would double-count everything.
        let known: HashSet<String> = answers.iter().map(|a| a.url.clone()).collect();

        let mut new_count = 0;
        for entry in entries {
            if known.contains(&entry.link) {
                continue;
            }
            new_count += 1;
            answers.push(Answer::new(
                entry.title,
                entry.description,
                topic.clone(),
                entry.guid,
                entry.link,
            ));
        }
        info!("found {} new answers for {}", new_count, topic);

        let mut tally = TopicTally::new();
        for answer in answers.iter_mut() {
            enrich_answer(&self.client, &self.config, answer).await?;
            for label in &answer.categories {
                *tally.entry(label.clone()).or_insert(0) += 1;
            }
        }

        self.store.save(&topic, &answers).await?;

        Ok(TopicIngest {
            answers,
            tally,
            new_count,
        })
    }
}
