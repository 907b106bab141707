use regex::Regex;

use crate::config::Config;

/// Per-article SEO fields, filled from the first-line comment or defaults.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub title: String,
    pub keywords: String,
    pub description: String,
    pub category: String,
}

/// Parse the optional first-line comment of the form
/// `<!-- title: xxx | keywords: yyy | description: zzz -->`.
///
/// A missing or malformed comment is not an error: every field keeps its
/// default (title falls back to the filename without extension).
pub fn parse_seo_meta(content: &str, filename: &str, config: &Config) -> Metadata {
    let mut metadata = Metadata {
        title: filename.trim_end_matches(".md").to_string(),
        keywords: config.default_keywords.clone(),
        description: String::new(),
        category: infer_category(filename, config),
    };

    let first_line = content.trim_start().lines().next().unwrap_or("");
    let comment_pattern = Regex::new(r"^<!--\s*(.+?)\s*-->$").unwrap();
    if let Some(caps) = comment_pattern.captures(first_line) {
        let comment = &caps[1];

        if let Some(title) = capture_field(comment, "title") {
            metadata.title = title;
        }
        if let Some(keywords) = capture_field(comment, "keywords") {
            metadata.keywords = keywords;
        }
        if let Some(description) = capture_field(comment, "description") {
            metadata.description = description;
        }
    }

    metadata
}

// value runs from the colon to the next `|` or the closing marker
fn capture_field(comment: &str, key: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"{key}:\s*([^|]+)")).unwrap();
    pattern
        .captures(comment)
        .map(|caps| caps[1].trim().to_string())
}

/// Pick a category by substring-matching the lowercased filename against
/// the taxonomy table, in table order. First match wins.
pub fn infer_category(filename: &str, config: &Config) -> String {
    let filename_lower = filename.to_lowercase();
    for (category, keywords) in config.categories.iter() {
        if keywords.iter().any(|k| filename_lower.contains(k.as_str())) {
            return category.clone();
        }
    }
    config.fallback_category.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_comment_overrides_defaults() {
        let config = Config::default();
        let content = "<!-- title: My Guide | keywords: a,b | description: short -->\nbody";
        let meta = parse_seo_meta(content, "some-file.md", &config);
        assert_eq!(meta.title, "My Guide");
        assert_eq!(meta.keywords, "a,b");
        assert_eq!(meta.description, "short");
    }

    #[test]
    fn partial_comment_keeps_remaining_defaults() {
        let config = Config::default();
        let content = "<!-- title: My Guide | keywords: a,b -->\nSome **content**.";
        let meta = parse_seo_meta(content, "guide.md", &config);
        assert_eq!(meta.title, "My Guide");
        assert_eq!(meta.keywords, "a,b");
        assert_eq!(meta.description, "");
    }

    #[test]
    fn no_comment_falls_back_to_filename_title() {
        let config = Config::default();
        let meta = parse_seo_meta("# Hello World", "zhongbiao-gonggao-001.md", &config);
        assert_eq!(meta.title, "zhongbiao-gonggao-001");
        assert_eq!(meta.keywords, config.default_keywords);
        assert_eq!(meta.description, "");
    }

    #[test]
    fn malformed_comment_leaves_defaults() {
        let config = Config::default();
        // unclosed comment does not match the first-line shape
        let meta = parse_seo_meta("<!-- title: broken\nbody", "notes.md", &config);
        assert_eq!(meta.title, "notes");
    }

    #[test]
    fn comment_after_first_line_is_ignored() {
        let config = Config::default();
        let content = "body first\n<!-- title: Late -->";
        let meta = parse_seo_meta(content, "notes.md", &config);
        assert_eq!(meta.title, "notes");
    }

    #[test]
    fn values_are_trimmed() {
        let config = Config::default();
        let content = "<!-- title:   Spaced Out   | description:  d  -->";
        let meta = parse_seo_meta(content, "x.md", &config);
        assert_eq!(meta.title, "Spaced Out");
        assert_eq!(meta.description, "d");
    }

    #[test]
    fn category_matches_pinyin_filename() {
        let config = Config::default();
        assert_eq!(infer_category("zhongbiao-gonggao-001.md", &config), "中标公告");
        assert_eq!(infer_category("zhengce-jiedu-2024.md", &config), "政策解读");
        assert_eq!(infer_category("toubiao-jiqiao.md", &config), "投标技巧");
    }

    #[test]
    fn category_matches_chinese_filename() {
        let config = Config::default();
        assert_eq!(infer_category("某项目中标公示.md", &config), "中标公告");
        assert_eq!(infer_category("投标流程指南.md", &config), "招标流程");
    }

    #[test]
    fn category_table_order_breaks_ties() {
        let config = Config::default();
        // matches both 中标公告 (gonggao) and 招标流程 (liucheng); first entry wins
        assert_eq!(infer_category("gonggao-liucheng.md", &config), "中标公告");
    }

    #[test]
    fn unmatched_filename_gets_fallback_category() {
        let config = Config::default();
        assert_eq!(infer_category("random-essay.md", &config), "其他");
    }

    #[test]
    fn alternate_taxonomy_is_honored() {
        let config = Config {
            categories: vec![("news".to_string(), vec!["daily".to_string()])],
            fallback_category: "misc".to_string(),
            ..Config::default()
        };
        assert_eq!(infer_category("daily-report.md", &config), "news");
        assert_eq!(infer_category("other.md", &config), "misc");
    }
}
