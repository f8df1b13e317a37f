/// Local adapters standing in for the distributed event and storage layer
mod local_event_source;
mod local_storage;

pub use local_event_source::{LocalEventSource, LOCAL_BUCKET};
pub use local_storage::LocalStorage;
