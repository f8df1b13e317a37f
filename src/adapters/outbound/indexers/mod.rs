/// In-process LogIndexer implementations
mod memory_indexer;
mod tee_indexer;

pub use memory_indexer::MemoryIndexer;
pub use tee_indexer::TeeIndexer;
