// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    expand_data_dir,
    parse_month_arg,
    parse_root_url,
    parse_since_arg,
    seed_override,
};

// Re-export run orchestration from gleaner-core
pub use gleaner_core::discovery::{
    DiscoveryOptions, IngestSummary, execute_discovery, execute_topic_ingest,
};
