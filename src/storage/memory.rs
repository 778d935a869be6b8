use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DeleteResult, DocumentStore, Note, NoteChanges, StoreError, StoredNote, UpdateResult};

/// Document store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<StoredNote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<StoredNote>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<StoredNote>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| doc.note.id == id)
            .cloned()
            .collect())
    }

    async fn insert(&self, note: Note) -> Result<StoredNote, StoreError> {
        let stored = StoredNote::assign(note);
        self.documents.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update_one(
        &self,
        id: &str,
        changes: NoteChanges,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        let mut documents = self.documents.write().await;

        if let Some(doc) = documents.iter_mut().find(|doc| doc.note.id == id) {
            let modified = changes.apply(&mut doc.note);
            return Ok(UpdateResult::matched(modified));
        }
        if !upsert {
            return Ok(UpdateResult::unmatched());
        }

        let Some(note) = changes.into_note(id) else {
            return Ok(UpdateResult::unmatched());
        };
        let stored = StoredNote::assign(note);
        let store_id = stored.store_id.clone();
        documents.push(stored);
        Ok(UpdateResult::upserted(store_id))
    }

    async fn delete_one(&self, id: &str) -> Result<DeleteResult, StoreError> {
        let mut documents = self.documents.write().await;

        match documents.iter().position(|doc| doc.note.id == id) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::deleted(1))
            }
            None => Ok(DeleteResult::deleted(0)),
        }
    }
}
