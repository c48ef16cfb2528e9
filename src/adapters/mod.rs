// Adapters layer: concrete catalog, storage and notification backends.

pub mod catalog;
pub mod notifier;
pub mod storage;

pub use catalog::HttpCatalog;
pub use notifier::{RecordingNotifier, TracingNotifier};
pub use storage::{FileStore, MemoryStore};
