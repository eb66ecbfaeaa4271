use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::normalize_url;

static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RSS_LINK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<link[^<]+?type="application/rss\+xml".+?>"#).unwrap());
static HREF_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="(.+?)""#).unwrap());
static SRC_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src=".+?""#).unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").unwrap());
// Tokens never contain quotes or angle brackets, so a match cannot span attributes or tags
static RSS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"((?:https?:/)?/[^\s"'<>]*?rss[^\s"'<>]*?)["'<]"#).unwrap());
static FEED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"((?:https?:/)?/[^\s"'<>]*?feed[^\s"'<>]*?)["'<]"#).unwrap());

/// Candidates declared by `<link type="application/rss+xml" href="...">` tags.
pub fn link_tag_candidates(base_url: &str, site_text: &str) -> IndexSet<String> {
    let text = HTML_COMMENT.replace_all(site_text, "");

    RSS_LINK_TAG
        .find_iter(&text)
        .filter_map(|tag| HREF_ATTR.captures(tag.as_str()))
        .map(|caps| normalize_url(base_url, &caps[1]))
        .collect()
}

/// Candidates mentioned anywhere in the page body outside RSS link tags.
///
/// Any slash-led token containing `rss` or `feed` and ending at a quote or
/// tag opener counts. `src` attributes are dropped first so image and script
/// URLs do not match.
pub fn body_candidates(base_url: &str, site_text: &str) -> IndexSet<String> {
    let text = HTML_COMMENT.replace_all(site_text, "");
    let text = RSS_LINK_TAG.replace_all(&text, "");
    let text = SRC_ATTR.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, "");

    let raw: IndexSet<&str> = RSS_TOKEN
        .captures_iter(&text)
        .chain(FEED_TOKEN.captures_iter(&text))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    raw.into_iter()
        .map(|candidate| normalize_url(base_url, candidate))
        .collect()
}
