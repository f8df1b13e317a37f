/// Network adapters for remote log indexing
mod elasticsearch_indexer;

pub use elasticsearch_indexer::{ElasticsearchConfig, ElasticsearchIndexer, DEFAULT_BATCH_SIZE};
