use std::sync::Arc;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::json;
use url::Url;

use crate::catalog::traits::Catalog;
use crate::discovery::normalize::origin_of;
use crate::domain::PublisherRecord;
use crate::errors::{ScoutError, ScoutResult};
use crate::fetch::Fetcher;

pub const DEFAULT_CATALOG_URL: &str = "http://www.mediamap.co.kr/?md=A01";

static DETAIL_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[style*="margin-right:13px;"]"#).unwrap());
static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Index of the publisher detail table among all tables on a detail page.
const DETAIL_TABLE: usize = 5;

// Cell indices inside the detail table
const NAME: usize = 2;
const MEDIA_TYPE: usize = 4;
const COMPANY_NAME: usize = 7;
const HOMEPAGE: usize = 9;
const CATEGORY: usize = 11;
const CALL: usize = 14;
const ADDRESS: usize = 16;
const AREA: usize = 18;
const DESCRIPTION: usize = 21;
const DETAIL_CONTACT: usize = 24;

/// Korean press directory at mediamap.co.kr.
pub struct MediamapCatalog<F: Fetcher + ?Sized> {
    fetcher: Arc<F>,
    listing_url: String,
}

impl<F: Fetcher + ?Sized> MediamapCatalog<F> {
    pub fn new(fetcher: Arc<F>, listing_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            listing_url: listing_url.into(),
        }
    }

    fn parse_listing(html: &str) -> Vec<String> {
        Html::parse_document(html)
            .select(&DETAIL_LINKS)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    fn parse_detail(detail_url: &str, html: &str) -> ScoutResult<PublisherRecord> {
        let document = Html::parse_document(html);
        let table = document.select(&TABLE).nth(DETAIL_TABLE).ok_or_else(|| {
            ScoutError::Catalog(format!("{}: detail table missing", detail_url))
        })?;
        let cells: Vec<ElementRef<'_>> = table.select(&CELL).collect();

        let cell = |index: usize| {
            cells.get(index).copied().ok_or_else(|| {
                ScoutError::Catalog(format!("{}: cell {} missing", detail_url, index))
            })
        };
        let text = |index: usize| cell(index).map(|c| joined_text(c, ""));

        let homepage_href = cell(HOMEPAGE)?
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ScoutError::Catalog(format!("{}: homepage link missing", detail_url)))?;
        let homepage = Url::parse(homepage_href.trim())
            .map_err(|e| ScoutError::InvalidUrl(format!("{}: {}", homepage_href, e)))?;

        let extra = json!({
            "mediamap": {
                "type": text(MEDIA_TYPE)?,
                "company_name": text(COMPANY_NAME)?,
                "category": text(CATEGORY)?,
                "call": text(CALL)?,
                "address": text(ADDRESS)?,
                "area": text(AREA)?,
                "description": cell(DESCRIPTION).map(|c| joined_text(c, "\n"))?,
                "detail_contact": text(DETAIL_CONTACT)?,
            }
        });

        Ok(
            PublisherRecord::new(text(NAME)?, origin_of(&homepage), detail_url.to_string())
                .with_extra(extra),
        )
    }
}

/// Trimmed text fragments of an element, empty ones dropped, joined by `separator`.
fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

impl<F: Fetcher + ?Sized> Catalog for MediamapCatalog<F> {
    fn list_detail_urls(&self) -> Vec<String> {
        match self.fetcher.fetch(&self.listing_url) {
            Some(html) => Self::parse_listing(&html),
            None => {
                tracing::warn!(url = %self.listing_url, "catalog listing unreachable");
                Vec::new()
            }
        }
    }

    fn fetch_publisher(&self, detail_url: &str) -> ScoutResult<PublisherRecord> {
        let html = self.fetcher.fetch(detail_url).ok_or_else(|| ScoutError::Transport {
            url: detail_url.to_string(),
            reason: "detail page unreachable".to_string(),
        })?;

        Self::parse_detail(detail_url, &html)
    }
}
