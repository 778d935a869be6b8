pub mod errors;
pub mod json_dir;
pub mod memory;
pub mod note;

use async_trait::async_trait;

pub use errors::StoreError;
pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use note::{DeleteResult, Note, NoteChanges, StoredNote, UpdateResult};

/// A collection of note documents, looked up by the note's own `id` field
/// rather than by the store key.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Every document, in insertion order
    async fn find_all(&self) -> Result<Vec<StoredNote>, StoreError>;

    /// Every document whose `id` equals `id`; empty when nothing matches
    async fn find_by_id(&self, id: &str) -> Result<Vec<StoredNote>, StoreError>;

    async fn insert(&self, note: Note) -> Result<StoredNote, StoreError>;

    /// Apply `changes` to the first document matching `id`, inserting a new
    /// one when nothing matches and `upsert` is set. An upsert whose changes
    /// carry no title inserts nothing and reports an unmatched result.
    async fn update_one(
        &self,
        id: &str,
        changes: NoteChanges,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError>;

    /// Remove the first document matching `id`
    async fn delete_one(&self, id: &str) -> Result<DeleteResult, StoreError>;
}
