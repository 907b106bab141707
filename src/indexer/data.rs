use serde::Serialize;

pub const INDEX_VERSION: &str = "1.0";

/// One index entry describing a single source file.
#[derive(Serialize, Debug, Clone)]
pub struct Article {
    pub filename: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub category: String,
}

/// Top-level object written to `index.json`.
#[derive(Serialize, Debug)]
pub struct IndexEnvelope {
    pub version: &'static str,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub total: usize,
    pub articles: Vec<Article>,
}
