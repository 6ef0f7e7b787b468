//! OpenSearch implementation of the search index provider.

mod index_config;
mod provider;

pub use index_config::{index_settings, IndexConfig, DEFAULT_INDEX_NAME};
pub use provider::OpenSearchProvider;
