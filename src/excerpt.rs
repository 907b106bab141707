use regex::Regex;

const ELLIPSIS: &str = "...";

/// Plain-text summary of an article body.
///
/// Drops the first-line SEO comment, removes Markdown punctuation as a
/// character class (no structural parsing), collapses whitespace, and
/// truncates to `max_length` code points plus an ellipsis marker.
pub fn generate_excerpt(content: &str, max_length: usize) -> String {
    let body = match content.lines().next() {
        Some(first) if first.starts_with("<!--") => {
            content.lines().skip(1).collect::<Vec<_>>().join("\n")
        }
        _ => content.to_string(),
    };

    let markup = Regex::new(r"[#*_`~\[\]()<>]").unwrap();
    let text = markup.replace_all(&body, "");
    let whitespace = Regex::new(r"\s+").unwrap();
    let text = whitespace.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_length).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
