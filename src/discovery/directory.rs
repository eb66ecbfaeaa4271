use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::domain::FeedCandidate;

static LISTING_ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("table.hover tr").unwrap());
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static FEED_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td a").unwrap());

/// Extract `(category, feed URL)` rows from a feed-directory page.
///
/// Only the hoverable-table layout is understood: each feed row has a `<th>`
/// with the category and a `<td>` whose anchor text is the feed URL. Rows
/// lacking either part are skipped, and pages of any other shape yield nothing.
pub fn parse_directory_page(site_text: &str) -> Vec<FeedCandidate> {
    let document = Html::parse_document(site_text);

    document
        .select(&LISTING_ROWS)
        .filter_map(|row| {
            let category = row.select(&HEADER_CELL).next()?;
            let anchor = row.select(&FEED_ANCHOR).next()?;

            let url = stripped_text(anchor);
            if url.is_empty() {
                return None;
            }

            Some(FeedCandidate::Listed {
                category: stripped_text(category),
                url,
            })
        })
        .collect()
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_without_header_cell_skipped() {
        let html = r#"<table class="hover">
            <tr><th>News</th><td><a href="http://a.example/rss">http://a.example/rss</a></td></tr>
            <tr><td></td><td><a href="http://b.example/rss">http://b.example/rss</a></td></tr>
        </table>"#;

        let rows = parse_directory_page(html);
        assert_eq!(
            rows,
            vec![FeedCandidate::Listed {
                category: "News".to_string(),
                url: "http://a.example/rss".to_string(),
            }]
        );
    }

    #[test]
    fn test_header_and_footer_rows_skipped() {
        let html = r#"<table class="hover list">
            <thead><tr><th>Category</th><th>Address</th></tr></thead>
            <tbody>
              <tr><th> Politics </th><td><a href="/p"> http://news.example/rss/politics.xml </a></td></tr>
              <tr><th>Sports</th><td><a href="/s">http://news.example/rss/sports.xml</a></td></tr>
            </tbody>
            <tfoot><tr><td colspan="2">Use these feeds freely</td></tr></tfoot>
        </table>"#;

        let rows = parse_directory_page(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            FeedCandidate::Listed {
                category: "Politics".to_string(),
                url: "http://news.example/rss/politics.xml".to_string(),
            }
        );
        assert_eq!(rows[1].url(), "http://news.example/rss/sports.xml");
    }

    #[test]
    fn test_other_layouts_yield_nothing() {
        let html = r#"<table><tr><th>News</th><td><a>http://a.example/rss</a></td></tr></table>
            <ul><li><a href="/rss">RSS</a></li></ul>"#;

        assert!(parse_directory_page(html).is_empty());
    }

    #[test]
    fn test_empty_anchor_skipped() {
        let html = r#"<table class="hover"><tr><th>News</th><td><a href="/rss"><img></a></td></tr></table>"#;
        assert!(parse_directory_page(html).is_empty());
    }
}
