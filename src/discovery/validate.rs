use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::domain::Validation;
use crate::errors::{ScoutError, ScoutResult};
use crate::fetch::Fetcher;

static XML_ENCODING_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*<\?xml[^>]*?encoding\s*=\s*["']([^"']+)["']"#).unwrap()
});

/// How a body that parsed as a syndication feed got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCheck {
    WellFormed,
    /// Only parses once its declared charset is overridden with the real one.
    EncodingMismatch { declared: String },
}

/// Parse a body as a feed. Mislabelled encodings are tolerated; anything else
/// that fails is a `MalformedFeed`.
pub fn check_feed(body: &str) -> ScoutResult<FeedCheck> {
    let error = match parser::parse(body.as_bytes()) {
        Ok(feed) => {
            tracing::debug!(feed_type = ?feed.feed_type, "parsed feed");
            return Ok(FeedCheck::WellFormed);
        }
        Err(e) => e.to_string(),
    };

    // Fetched bodies are already decoded, so whatever charset the prolog declares is stale
    if let Some((declared, relabelled)) = relabel_as_utf8(body) {
        if parser::parse(relabelled.as_bytes()).is_ok() {
            return Ok(FeedCheck::EncodingMismatch { declared });
        }
    }

    Err(ScoutError::MalformedFeed(error))
}

fn relabel_as_utf8(body: &str) -> Option<(String, String)> {
    let caps = XML_ENCODING_DECL.captures(body)?;
    let declared = caps.get(1)?;
    if declared.as_str().eq_ignore_ascii_case("utf-8") {
        return None;
    }

    let mut relabelled = String::with_capacity(body.len());
    relabelled.push_str(&body[..declared.start()]);
    relabelled.push_str("UTF-8");
    relabelled.push_str(&body[declared.end()..]);

    Some((declared.as_str().to_string(), relabelled))
}

/// Parse a body as generic HTML. Only a body without any markup or text fails.
pub fn parse_html(body: &str) -> ScoutResult<Html> {
    if body.trim().is_empty() {
        return Err(ScoutError::MalformedHtml("document is empty".to_string()));
    }
    Ok(Html::parse_document(body))
}

/// Fetch a candidate and decide whether it is a feed, a feed-directory page, or neither.
pub fn validate_candidate<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Option<Validation> {
    let body = fetcher.fetch(url)?;

    match check_feed(&body) {
        Ok(FeedCheck::WellFormed) => Some(Validation::Feed {
            url: url.to_string(),
        }),
        Ok(FeedCheck::EncodingMismatch { declared }) => {
            tracing::debug!(url = %url, declared = %declared, "feed with mislabelled encoding");
            Some(Validation::Feed {
                url: url.to_string(),
            })
        }
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "not a feed, trying HTML");
            match parse_html(&body) {
                Ok(_) => Some(Validation::DirectoryPage {
                    url: url.to_string(),
                    text: body,
                }),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "candidate rejected");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::fetch::MockFetcher;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Daily News</title>
    <link>http://news.example/</link>
    <description>Top stories</description>
    <item>
      <title>Headline</title>
      <link>http://news.example/1</link>
      <guid>http://news.example/1</guid>
    </item>
  </channel>
</rss>"#;

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Daily News</title>
  <id>http://news.example/atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
</feed>"#;

    const DIRECTORY_PAGE: &str = r##"<html><body>
<table class="hover">
  <tr><th>All</th><td><a href="#">http://news.example/rss/all.xml</a></td></tr>
</table>
</body></html>"##;

    #[test]
    fn test_rss_and_atom_are_well_formed() {
        assert_eq!(check_feed(SAMPLE_RSS).unwrap(), FeedCheck::WellFormed);
        assert_eq!(check_feed(SAMPLE_ATOM).unwrap(), FeedCheck::WellFormed);
    }

    #[test]
    fn test_html_is_malformed_feed() {
        assert!(matches!(
            check_feed(DIRECTORY_PAGE),
            Err(ScoutError::MalformedFeed(_))
        ));
    }

    #[test]
    fn test_mislabelled_encoding_still_counts_as_feed() {
        let mislabelled = SAMPLE_RSS.replace("UTF-8", "x-no-such-charset");
        assert!(check_feed(&mislabelled).is_ok());
    }

    #[test]
    fn test_relabel_leaves_utf8_alone() {
        assert!(relabel_as_utf8(SAMPLE_RSS).is_none());

        let (declared, relabelled) = relabel_as_utf8(r#"<?xml version="1.0" encoding="euc-kr"?><rss/>"#).unwrap();
        assert_eq!(declared, "euc-kr");
        assert_eq!(relabelled, r#"<?xml version="1.0" encoding="UTF-8"?><rss/>"#);
    }

    #[test]
    fn test_blank_html_fails() {
        assert!(parse_html("  \n ").is_err());
        assert!(parse_html("<p>hi</p>").is_ok());
    }

    #[test]
    fn test_feed_classified_as_feed() {
        let fetcher = StaticFetcher::new().with_page("http://news.example/rss", SAMPLE_RSS);

        let result = validate_candidate(&fetcher, "http://news.example/rss");
        assert_eq!(
            result,
            Some(Validation::Feed {
                url: "http://news.example/rss".to_string()
            })
        );
    }

    #[test]
    fn test_mislabelled_feed_not_routed_to_html() {
        let body = SAMPLE_RSS.replace("UTF-8", "x-no-such-charset");
        let fetcher = StaticFetcher::new().with_page("http://news.example/rss", &body);

        let result = validate_candidate(&fetcher, "http://news.example/rss");
        assert!(matches!(result, Some(Validation::Feed { .. })));
    }

    #[test]
    fn test_html_classified_as_directory_page() {
        let fetcher = StaticFetcher::new().with_page("http://news.example/rss", DIRECTORY_PAGE);

        match validate_candidate(&fetcher, "http://news.example/rss") {
            Some(Validation::DirectoryPage { url, text }) => {
                assert_eq!(url, "http://news.example/rss");
                assert_eq!(text, DIRECTORY_PAGE);
            }
            other => panic!("expected directory page, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_body_rejected() {
        let fetcher = StaticFetcher::new().with_page("http://news.example/rss", "   ");
        assert!(validate_candidate(&fetcher, "http://news.example/rss").is_none());
    }

    #[test]
    fn test_fetch_failure_rejected() {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url == "http://news.example/missing")
            .times(1)
            .returning(|_| None);

        assert!(validate_candidate(&fetcher, "http://news.example/missing").is_none());
    }
}
