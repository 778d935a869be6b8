//! Personal note-taking: a REST service persisting notes to a document
//! store, and a terminal editor holding a session's notes in memory.

pub mod config;
pub mod http;
pub mod logging;
pub mod service;
pub mod storage;
pub mod tui;

pub use config::{ConfigError, ServerConfig, StorageConfig};
pub use http::{AppState, build_router};
pub use service::{NoteError, NoteService, ServiceOptions};
pub use storage::{DocumentStore, JsonDirStore, MemoryStore, Note, StoredNote};
