pub mod crawl_service;
pub mod export_service;

pub use crawl_service::{CrawlService, CrawlSettings, StepOutcome};
pub use export_service::ExportService;
