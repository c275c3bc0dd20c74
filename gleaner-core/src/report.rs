// Corpus report generation from the store directory

use gleaner_harvester::CorpusStore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicStats {
    pub topic: String,
    pub answers: usize,
    /// Answers carrying two or more labels.
    pub enriched: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    pub topics: Vec<TopicStats>,
    pub total_answers: usize,
    /// Distinct answer URLs across all stores; an answer can appear in the
    /// store of every topic whose feed carried it.
    pub unique_urls: usize,
    /// Label occurrence counts, most frequent first.
    pub label_counts: Vec<(String, usize)>,
}

/// Walk every store file and aggregate corpus statistics.
pub async fn gather_corpus_report(store: &CorpusStore) -> Result<CorpusReport, String> {
    let mut topics = store
        .topics()
        .await
        .map_err(|e| format!("Failed to list stores: {}", e))?;
    topics.sort();

    let mut stats = Vec::new();
    let mut urls: HashSet<String> = HashSet::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut total_answers = 0;

    for topic in topics {
        let answers = store
            .load(&topic)
            .await
            .map_err(|e| format!("Failed to load store for {}: {}", topic, e))?;

        let enriched = answers.iter().filter(|a| a.categories.len() >= 2).count();
        total_answers += answers.len();

        for answer in &answers {
            urls.insert(answer.url.clone());
            for label in &answer.categories {
                *labels.entry(label.clone()).or_insert(0) += 1;
            }
        }

        stats.push(TopicStats {
            topic,
            answers: answers.len(),
            enriched,
        });
    }

    let mut label_counts: Vec<(String, usize)> = labels.into_iter().collect();
    label_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(CorpusReport {
        topics: stats,
        total_answers,
        unique_urls: urls.len(),
        label_counts,
    })
}

pub fn generate_text_report(report: &CorpusReport) -> String {
    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Summary:\n");
    out.push_str(&format!("  Topics harvested: {}\n", report.topics.len()));
    out.push_str(&format!("  Total answers: {}\n", report.total_answers));
    out.push_str(&format!("  Unique answer URLs: {}\n", report.unique_urls));
    out.push_str(&format!("  Distinct labels: {}\n", report.label_counts.len()));
    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    out.push_str("# Per-topic stores:\n");
    for stats in &report.topics {
        out.push_str(&format!(
            "  {} - {} answers ({} enriched)\n",
            stats.topic, stats.answers, stats.enriched
        ));
    }

    if !report.label_counts.is_empty() {
        out.push_str("\n# Most frequent labels:\n");
        for (label, count) in report.label_counts.iter().take(20) {
            out.push_str(&format!("  {:>6}  {}\n", count, label));
        }
    }

    out
}

pub fn generate_json_report(report: &CorpusReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Failed to encode report: {}", e))
}
