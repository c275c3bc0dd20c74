pub mod answer;
pub mod archive;
pub mod client;
pub mod discover;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod popularity;
pub mod store;
pub mod topics;

pub use answer::Answer;
pub use archive::{ArchiveHarvester, ArchivePost};
pub use client::HarvesterConfig;
pub use discover::{DiscoveryEngine, DiscoverySummary, VisitCallback};
pub use error::HarvestError;
pub use ingest::{Ingestor, TopicIngest, TopicTally};
pub use store::CorpusStore;
