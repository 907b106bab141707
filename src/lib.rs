pub mod config;
pub mod excerpt;
pub mod indexer;
pub mod metadata;
pub mod timestamp;
