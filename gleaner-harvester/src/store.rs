// Per-topic JSON persistence for harvested answers

use crate::answer::Answer;
use crate::error::Result;
use crate::topics::normalize_topic;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed store holding one JSON array of answers per topic. Every save
/// overwrites the topic's file with the full merged set, so a store file is
/// always the complete deduplicated corpus for that topic.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    root: PathBuf,
}

impl CorpusStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn topic_path(&self, topic: &str) -> PathBuf {
        self.root.join(format!("{}.json", normalize_topic(topic)))
    }

    /// Load the persisted answers for a topic. A topic that was never
    /// ingested has no file, which is not an error.
    pub async fn load(&self, topic: &str) -> Result<Vec<Answer>> {
        let path = self.topic_path(topic);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist the full answer sequence for a topic, creating the store
    /// directory on first use.
    pub async fn save(&self, topic: &str, answers: &[Answer]) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        let raw = serde_json::to_string(answers)?;
        fs::write(self.topic_path(topic), raw).await?;
        Ok(())
    }

    /// Topics that have a store file, in directory order.
    pub async fn topics(&self) -> Result<Vec<String>> {
        let mut topics = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(topics),
            Err(err) => return Err(err.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                topics.push(stem.to_string());
            }
        }
        Ok(topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn answer(url: &str) -> Answer {
        Answer::new(
            "Why is the sky blue?".to_string(),
            "Rayleigh scattering.".to_string(),
            "Physics".to_string(),
            "guid-1".to_string(),
            url.to_string(),
        )
    }

    #[tokio::test]
    async fn test_load_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        let answers = store.load("Physics").await.unwrap();
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());

        let answers = vec![answer("https://forum.example/a/1"), answer("https://forum.example/a/2")];
        store.save("Physics", &answers).await.unwrap();

        let loaded = store.load("Physics").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].url, "https://forum.example/a/1");
        assert_eq!(loaded[0].categories, vec!["Physics"]);
    }

    #[tokio::test]
    async fn test_topic_path_is_normalized() {
        let store = CorpusStore::new("data");
        assert_eq!(
            store.topic_path("Quantum Mechanics"),
            PathBuf::from("data/Quantum-Mechanics.json")
        );
    }

    #[tokio::test]
    async fn test_save_creates_store_dir() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path().join("nested/training-data"));
        store.save("Luck", &[answer("https://forum.example/a/3")]).await.unwrap();
        assert!(store.topic_path("Luck").exists());
    }

    #[tokio::test]
    async fn test_topics_lists_store_files() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        store.save("Physics", &[answer("https://forum.example/a/1")]).await.unwrap();
        store.save("Luck", &[answer("https://forum.example/a/2")]).await.unwrap();

        let mut topics = store.topics().await.unwrap();
        topics.sort();
        assert_eq!(topics, vec!["Luck", "Physics"]);
    }

    #[tokio::test]
    async fn test_load_malformed_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        tokio::fs::write(store.topic_path("Physics"), "not json")
            .await
            .unwrap();
        assert!(store.load("Physics").await.is_err());
    }
}
