pub mod http;
pub mod traits;

pub use http::HttpAnnouncementSource;
pub use traits::{AnnouncementSource, FetchFuture};

use crate::config::SourceConfig;
use crate::error::FetchError;
use std::sync::Arc;

/// Factory: build the configured announcement source.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn AnnouncementSource>, FetchError> {
    Ok(Arc::new(HttpAnnouncementSource::from_config(config)?))
}
