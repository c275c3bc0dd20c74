// Tests for corpus report generation

use gleaner_core::report::{CorpusReport, ReportFormat, gather_corpus_report, generate_json_report, generate_text_report};
use gleaner_harvester::{Answer, CorpusStore};
use tempfile::TempDir;

fn answer(url: &str, labels: &[&str]) -> Answer {
    Answer {
        question: "Q".to_string(),
        body: "A".to_string(),
        categories: labels.iter().map(|l| l.to_string()).collect(),
        feed_id: "guid".to_string(),
        url: url.to_string(),
    }
}

async fn seeded_store(dir: &TempDir) -> CorpusStore {
    let store = CorpusStore::new(dir.path());
    store
        .save(
            "Physics",
            &[
                answer("https://forum.example/a/1", &["Physics", "Astronomy"]),
                answer("https://forum.example/a/2", &["Physics"]),
            ],
        )
        .await
        .unwrap();
    store
        .save(
            "Astronomy",
            &[answer("https://forum.example/a/1", &["Astronomy", "Physics"])],
        )
        .await
        .unwrap();
    store
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
}

#[test]
fn test_report_format_from_str_json() {
    assert!(matches!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_unknown() {
    assert!(ReportFormat::from_str("yaml").is_none());
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[tokio::test]
async fn test_gather_corpus_report_counts() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let report = gather_corpus_report(&store).await.unwrap();

    assert_eq!(report.topics.len(), 2);
    assert_eq!(report.total_answers, 3);
    // answer/1 sits in both stores but counts once
    assert_eq!(report.unique_urls, 2);

    // topics come back sorted
    assert_eq!(report.topics[0].topic, "Astronomy");
    assert_eq!(report.topics[1].topic, "Physics");
    assert_eq!(report.topics[1].answers, 2);
    assert_eq!(report.topics[1].enriched, 1);

    // Physics: 3 occurrences, Astronomy: 2
    assert_eq!(report.label_counts[0], ("Physics".to_string(), 3));
    assert_eq!(report.label_counts[1], ("Astronomy".to_string(), 2));
}

#[tokio::test]
async fn test_gather_corpus_report_empty_dir() {
    let dir = TempDir::new().unwrap();
    let store = CorpusStore::new(dir.path());

    let report = gather_corpus_report(&store).await.unwrap();
    assert!(report.topics.is_empty());
    assert_eq!(report.total_answers, 0);
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[tokio::test]
async fn test_text_report_mentions_topics_and_counts() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;
    let report = gather_corpus_report(&store).await.unwrap();

    let text = generate_text_report(&report);
    assert!(text.contains("Topics harvested: 2"));
    assert!(text.contains("Total answers: 3"));
    assert!(text.contains("Physics - 2 answers (1 enriched)"));
}

#[tokio::test]
async fn test_json_report_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;
    let report = gather_corpus_report(&store).await.unwrap();

    let json = generate_json_report(&report).unwrap();
    let decoded: CorpusReport = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.total_answers, report.total_answers);
    assert_eq!(decoded.label_counts, report.label_counts);
}
