use opml::{Head, Outline, OPML};

use crate::domain::{CrawlState, PublisherStatus};
use crate::errors::{ScoutError, ScoutResult};

pub struct ExportService;

impl ExportService {
    /// Export discovered feeds to OPML, one outline per crawled publisher.
    pub fn to_opml(state: &CrawlState) -> ScoutResult<String> {
        let mut opml = OPML::default();
        opml.head = Some(Head {
            title: Some("feedscout discovered feeds".to_string()),
            ..Default::default()
        });

        for record in state.records() {
            if record.status != PublisherStatus::Parsed || record.rss.is_empty() {
                continue;
            }

            let feeds = record
                .rss
                .iter()
                .map(|feed| Outline {
                    text: feed.category.clone().unwrap_or_else(|| record.name.clone()),
                    r#type: Some("rss".to_string()),
                    xml_url: Some(feed.url.clone()),
                    ..Default::default()
                })
                .collect();

            opml.body.outlines.push(Outline {
                text: record.name.clone(),
                title: Some(record.name.clone()),
                html_url: Some(record.url.clone()),
                outlines: feeds,
                ..Default::default()
            });
        }

        opml.to_string()
            .map_err(|e| ScoutError::OpmlExport(e.to_string()))
    }
}
