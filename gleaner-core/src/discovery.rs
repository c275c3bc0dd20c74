// Discovery-run orchestration on top of the harvesting engine

use gleaner_harvester::{DiscoveryEngine, DiscoverySummary, HarvesterConfig, TopicTally};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for configuring a discovery run
pub struct DiscoveryOptions {
    pub max_visits: usize,
    pub data_dir: PathBuf,
    /// Replaces the built-in seed set when given.
    pub seeds: Option<Vec<String>>,
    /// Overrides the production forum root, mainly for self-hosted mirrors.
    pub forum_url: Option<String>,
    pub session_cookie: String,
    pub show_progress_bars: bool,
}

/// Outcome of a directly triggered single-topic ingest.
pub struct IngestSummary {
    pub topic: String,
    pub total_answers: usize,
    pub new_answers: usize,
    pub tally: TopicTally,
}

fn harvester_config(
    data_dir: PathBuf,
    forum_url: Option<String>,
    session_cookie: String,
) -> HarvesterConfig {
    let mut config = HarvesterConfig {
        data_dir,
        session_cookie,
        ..Default::default()
    };
    if let Some(forum_url) = forum_url {
        config.forum_url = forum_url;
    }
    config
}

/// Run topic discovery with the given options.
/// Returns a summary of the visits made.
pub async fn execute_discovery(options: DiscoveryOptions) -> Result<DiscoverySummary, String> {
    let DiscoveryOptions {
        max_visits,
        data_dir,
        seeds,
        forum_url,
        session_cookie,
        show_progress_bars,
    } = options;

    let config = harvester_config(data_dir, forum_url, session_cookie);

    // Single spinner for overall run progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Seeding frontier...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut engine = DiscoveryEngine::new(config);
    if let Some(seeds) = seeds {
        engine = engine.with_seeds(seeds);
    }
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        engine = engine.with_visit_callback(Arc::new(move |topic: String, followers: u64| {
            pb_clone.set_message(format!("Visiting {} ({} followers)", topic, followers));
            pb_clone.tick();
        }));
    }

    let summary = engine
        .run(max_visits)
        .await
        .map_err(|e| format!("Discovery failed: {}", e))?;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Discovery complete! {} topics visited, {} new answers",
            summary.visited.len(),
            summary.new_answers
        ));
    }

    Ok(summary)
}

/// Ingest one named topic without running the frontier, returning the label
/// tally so the caller can see what the topic co-occurs with.
pub async fn execute_topic_ingest(
    topic: &str,
    data_dir: PathBuf,
    forum_url: Option<String>,
    session_cookie: String,
) -> Result<IngestSummary, String> {
    let config = harvester_config(data_dir, forum_url, session_cookie);

    let mut engine = DiscoveryEngine::new(config);
    let outcome = engine
        .ingest_single(topic)
        .await
        .map_err(|e| format!("Ingest of {} failed: {}", topic, e))?;

    Ok(IngestSummary {
        topic: topic.to_string(),
        total_answers: outcome.answers.len(),
        new_answers: outcome.new_count,
        tally: outcome.tally,
    })
}
