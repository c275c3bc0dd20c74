// Priority-driven discovery over the unbounded topic graph

use crate::client::HarvesterConfig;
use crate::error::{HarvestError, Result};
use crate::ingest::{Ingestor, TopicIngest, TopicTally};
use crate::popularity::follower_count;
use crate::topics::normalize_topic;
use futures::future::join_all;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

pub type VisitCallback = Arc<dyn Fn(String, u64) + Send + Sync>;

/// Topics every discovery run can start from. Seeds enter the first tally
/// with a synthetic count above the enqueue threshold, so they qualify
/// without ever having been observed in a feed.
pub const DEFAULT_SEED_TOPICS: [&str; 9] = [
    "Physics",
    "Politics",
    "United-Kingdom",
    "Education",
    "The-United-States-of-America",
    "Luck",
    "Science",
    "Germany",
    "History",
];

const SEED_TALLY: u32 = 5;
// A topic qualifies for the frontier once more than one answer references it.
const ENQUEUE_THRESHOLD: u32 = 1;

/// A discovered topic scored for frontier ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredTopic {
    pub name: String,
    pub followers: u64,
}

impl Ord for ScoredTopic {
    fn cmp(&self, other: &Self) -> Ordering {
        // More followers wins; equal scores fall back to name order so that
        // runs are deterministic.
        self.followers
            .cmp(&other.followers)
            .then_with(|| other.name.cmp(&self.name))
    }
}

impl PartialOrd for ScoredTopic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What one discovery run accomplished.
#[derive(Debug, Default)]
pub struct DiscoverySummary {
    /// Topics ingested, in visit order.
    pub visited: Vec<String>,
    /// Answers that were new to their store across all visits.
    pub new_answers: usize,
    /// Scored topics still waiting on the frontier when the run ended.
    pub frontier_len: usize,
}

/// Explores the topic graph: repeatedly pops the most-followed unvisited
/// topic, ingests its feed, and enqueues whichever freshly observed topics
/// co-occur often enough to look worth harvesting.
///
/// All exploration state lives in this struct and dies with the run; only
/// the per-topic stores persist.
pub struct DiscoveryEngine {
    ingestor: Ingestor,
    seeds: Vec<String>,
    seen: HashSet<String>,
    visited: HashSet<String>,
    frontier: BinaryHeap<ScoredTopic>,
    visit_callback: Option<VisitCallback>,
}

impl DiscoveryEngine {
    pub fn new(config: HarvesterConfig) -> Self {
        Self {
            ingestor: Ingestor::new(config),
            seeds: DEFAULT_SEED_TOPICS.iter().map(|s| s.to_string()).collect(),
            seen: HashSet::new(),
            visited: HashSet::new(),
            frontier: BinaryHeap::new(),
            visit_callback: None,
        }
    }

    pub fn with_seeds(mut self, seeds: Vec<String>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_visit_callback(mut self, callback: VisitCallback) -> Self {
        self.visit_callback = Some(callback);
        self
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn seen(&self) -> &HashSet<String> {
        &self.seen
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Run discovery until the visit budget is spent or the frontier dries
    /// up. The budget strictly bounds the number of ingestions, so the loop
    /// always terminates even though the topic graph is unbounded.
    pub async fn run(&mut self, max_visits: usize) -> Result<DiscoverySummary> {
        let mut tally: TopicTally = self
            .seeds
            .iter()
            .map(|s| (normalize_topic(s), SEED_TALLY))
            .collect();

        let mut summary = DiscoverySummary::default();

        loop {
            self.enqueue_candidates(&tally).await?;

            if summary.visited.len() >= max_visits {
                break;
            }
            let Some(top) = self.frontier.pop() else {
                break;
            };

            self.visited.insert(top.name.clone());
            info!("visiting {} with {} followers", top.name, top.followers);
            if let Some(ref callback) = self.visit_callback {
                callback(top.name.clone(), top.followers);
            }

            let ingest = self.ingestor.ingest_topic(&top.name).await?;
            summary.visited.push(top.name);
            summary.new_answers += ingest.new_count;

            // Exploration is locally greedy: only the latest visit's tally
            // feeds the next expansion.
            tally = ingest.tally;
        }

        summary.frontier_len = self.frontier.len();
        Ok(summary)
    }

    /// One visit without the frontier: ingest a single named topic and hand
    /// the resulting tally back to the caller.
    pub async fn ingest_single(&mut self, topic: &str) -> Result<TopicIngest> {
        let name = normalize_topic(topic);
        self.visited.insert(name.clone());
        self.ingestor.ingest_topic(&name).await
    }

    /// Score and enqueue every tallied topic that qualifies and has not been
    /// seen this run. Follower counts are independent reads, so the batch is
    /// fetched concurrently; the frontier itself is only touched once the
    /// whole batch is in.
    async fn enqueue_candidates(&mut self, tally: &TopicTally) -> Result<()> {
        let candidates: Vec<String> = tally
            .iter()
            .filter(|(name, count)| {
                **count > ENQUEUE_THRESHOLD
                    && !self.seen.contains(*name)
                    && !self.visited.contains(*name)
            })
            .map(|(name, _)| name.clone())
            .collect();

        let client = self.ingestor.client().clone();
        let config = self.ingestor.config().clone();
        let fetches = candidates.into_iter().map(|name| {
            let client = client.clone();
            let config = config.clone();
            async move {
                let followers = follower_count(&client, &config, &name).await?;
                Ok::<ScoredTopic, HarvestError>(ScoredTopic { name, followers })
            }
        });

        let batch = join_all(fetches).await;
        for scored in batch {
            let scored = scored?;
            debug!("enqueueing {} ({} followers)", scored.name, scored.followers);
            self.seen.insert(scored.name.clone());
            self.frontier.push(scored);
        }
        Ok(())
    }
}
