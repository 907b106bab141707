use std::{collections::HashMap, path::Path};

use anyhow::Context;
use chrono::Utc;
use log::{info, warn};

use crate::{
    config::{Config, INDEX_FILE_NAME},
    excerpt::generate_excerpt,
    metadata::parse_seo_meta,
    timestamp::{format_instant, resolve_mtime, CommitTimeSource},
};

pub mod data;

use self::data::{Article, IndexEnvelope, INDEX_VERSION};

/// List the Markdown filenames to index, sorted for deterministic runs.
///
/// Non-recursive. The index file itself and the directory README are
/// excluded. A missing directory is reported and yields an empty list;
/// the run then ends without writing anything.
pub fn discover_files(config: &Config) -> anyhow::Result<Vec<String>> {
    let dir = &config.markdown_dir;
    if !dir.is_dir() {
        warn!("markdown directory {dir:?} does not exist");
        println!("Markdown directory {} does not exist", dir.display());
        return Ok(vec![]);
    }

    let mut files = vec![];
    for entry in std::fs::read_dir(dir).with_context(|| format!("while listing {dir:?}"))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".md") || name == INDEX_FILE_NAME || name == "README.md" {
            continue;
        }
        files.push(name);
    }
    files.sort();

    Ok(files)
}

fn process_file(
    filename: &str,
    config: &Config,
    commit_times: &dyn CommitTimeSource,
) -> anyhow::Result<Article> {
    let path = config.markdown_dir.join(filename);
    let content = std::fs::read_to_string(&path).with_context(|| format!("while reading {path:?}"))?;

    let mut meta = parse_seo_meta(&content, filename, config);
    let excerpt = generate_excerpt(&content, config.excerpt_max_len);
    if meta.description.is_empty() {
        meta.description = excerpt.clone();
    }
    let date = resolve_mtime(&path, commit_times);

    Ok(Article {
        filename: filename.to_string(),
        title: meta.title,
        excerpt,
        date,
        category: meta.category,
    })
}

/// Assemble the envelope from processed articles: date-descending order,
/// fixed version tag, refresh time taken at build completion.
pub fn build_envelope(mut articles: Vec<Article>) -> IndexEnvelope {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    IndexEnvelope {
        version: INDEX_VERSION,
        last_updated: format_instant(Utc::now()),
        total: articles.len(),
        articles,
    }
}

// write to a temp file in the same directory, then rename over the
// destination, so a failed run never leaves a partial index behind
fn write_index(path: &Path, envelope: &IndexEnvelope) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(envelope)?;
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json).with_context(|| format!("while writing {temp_path:?}"))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("while renaming {temp_path:?} to {path:?}"))?;
    Ok(())
}

/// Run the whole pipeline: discover, process each file (skipping the ones
/// that cannot be read), sort, and write `index.json` into the article
/// directory. Zero discovered files means nothing is written.
pub fn generate_index(config: &Config, commit_times: &dyn CommitTimeSource) -> anyhow::Result<()> {
    println!("Scanning {} for Markdown files...", config.markdown_dir.display());

    let files = discover_files(config)?;
    println!("Found {} Markdown files", files.len());
    if files.is_empty() {
        return Ok(());
    }

    let mut articles = vec![];
    for filename in files.iter() {
        match process_file(filename, config, commit_times) {
            Ok(article) => {
                println!("  ✓ {} - {}", filename, article.title);
                articles.push(article);
            }
            Err(e) => {
                warn!("skipping {filename}: {e:#}");
                println!("  ✗ {filename}: {e:#}");
            }
        }
    }

    let envelope = build_envelope(articles);
    let index_path = config.markdown_dir.join(INDEX_FILE_NAME);
    if let Err(e) = write_index(&index_path, &envelope) {
        warn!("failed to write {index_path:?}: {e:#}");
        println!("Failed to write {}: {e:#}", index_path.display());
        return Ok(());
    }
    info!("wrote {} articles to {index_path:?}", envelope.total);

    println!("\nGenerated {}", index_path.display());
    println!("  Total articles: {}", envelope.total);
    println!("  Last updated:   {}", envelope.last_updated);
    print_category_summary(&envelope.articles);

    Ok(())
}

fn print_category_summary(articles: &[Article]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.category.as_str()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("  Categories:");
    for (category, count) in counts {
        println!("    - {category}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(filename: &str, date: &str) -> Article {
        Article {
            filename: filename.to_string(),
            title: filename.trim_end_matches(".md").to_string(),
            excerpt: String::new(),
            date: date.to_string(),
            category: "其他".to_string(),
        }
    }

    #[test]
    fn envelope_sorts_by_date_descending() {
        let envelope = build_envelope(vec![
            article("old.md", "2023-01-01T00:00:00Z"),
            article("new.md", "2025-06-30T08:00:00Z"),
            article("mid.md", "2024-03-15T12:30:00Z"),
        ]);
        let dates: Vec<_> = envelope.articles.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(
            dates,
            [
                "2025-06-30T08:00:00Z",
                "2024-03-15T12:30:00Z",
                "2023-01-01T00:00:00Z"
            ]
        );
    }

    #[test]
    fn envelope_total_matches_article_count() {
        let envelope = build_envelope(vec![
            article("a.md", "2024-01-01T00:00:00Z"),
            article("b.md", "2024-01-02T00:00:00Z"),
        ]);
        assert_eq!(envelope.total, envelope.articles.len());
        assert_eq!(envelope.version, "1.0");
    }

    #[test]
    fn envelope_serializes_with_expected_keys() {
        let envelope = build_envelope(vec![article("a.md", "2024-01-01T00:00:00Z")]);
        let json = serde_json::to_string_pretty(&envelope).unwrap();
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"version\": \"1.0\""));
        assert!(json.contains("\"filename\": \"a.md\""));
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let mut entry = article("a.md", "2024-01-01T00:00:00Z");
        entry.category = "中标公告".to_string();
        let json = serde_json::to_string_pretty(&build_envelope(vec![entry])).unwrap();
        assert!(json.contains("中标公告"));
        assert!(!json.contains("\\u"));
    }
}
