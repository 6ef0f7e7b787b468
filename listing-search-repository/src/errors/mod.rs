//! Search index error types.

mod search_index_error;

pub use search_index_error::SearchIndexError;
