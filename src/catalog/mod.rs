pub mod mediamap;
pub mod traits;

pub use mediamap::{MediamapCatalog, DEFAULT_CATALOG_URL};
pub use traits::Catalog;

#[cfg(test)]
pub use traits::MockCatalog;
