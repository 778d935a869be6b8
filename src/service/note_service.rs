use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::errors::NoteError;
use super::requests::{CreateNoteRequest, UpdateNoteRequest};
use crate::storage::{DeleteResult, DocumentStore, StoredNote, UpdateResult};

/// Behaviour switches for the note service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Report 404 for id lookups with no match instead of an empty result,
    /// and refuse to upsert on update
    pub strict_not_found: bool,
    pub list_delay: Duration,
    pub create_delay: Duration,
    pub update_delay: Duration,
}

impl ServiceOptions {
    /// Delays mimicking a slow network, for front-end development
    pub fn with_simulated_latency(mut self) -> Self {
        self.list_delay = Duration::from_millis(700);
        self.create_delay = Duration::from_millis(1000);
        self.update_delay = Duration::from_millis(1000);
        self
    }
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn DocumentStore>,
    options: ServiceOptions,
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl NoteService {
    pub fn new(store: Arc<dyn DocumentStore>, options: ServiceOptions) -> Self {
        NoteService { store, options }
    }

    /// Load all notes
    pub async fn list_notes(&self) -> Result<Vec<StoredNote>, NoteError> {
        pause(self.options.list_delay).await;

        let notes = self.store.find_all().await?;
        info!(count = notes.len(), "notes fetched from store");
        Ok(notes)
    }

    /// Get the notes carrying `id`
    pub async fn get_note(&self, id: &str) -> Result<Vec<StoredNote>, NoteError> {
        let notes = self.store.find_by_id(id).await?;
        if notes.is_empty() && self.options.strict_not_found {
            return Err(NoteError::NotFound);
        }

        info!(id, matches = notes.len(), "note fetched from store");
        Ok(notes)
    }

    /// Create a new note
    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<StoredNote, NoteError> {
        pause(self.options.create_delay).await;

        let note = request.into_note()?;
        let stored = self.store.insert(note).await?;
        info!(id = %stored.note.id, store_id = %stored.store_id, "new note saved to store");
        Ok(stored)
    }

    /// Update a note, creating it when no note carries `id` unless in strict mode
    pub async fn update_note(
        &self,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<UpdateResult, NoteError> {
        pause(self.options.update_delay).await;

        let changes = request.into_changes()?;
        let upsert = !self.options.strict_not_found;
        let result = self.store.update_one(id, changes, upsert).await?;

        // Nothing matched, and either upserting is off or the store refused
        // to insert a note without a title
        if result.is_unmatched() {
            return Err(if upsert {
                NoteError::title_required()
            } else {
                NoteError::NotFound
            });
        }
        info!(
            id,
            matched = result.matched_count,
            upserted = result.upserted_count,
            "note updated in store"
        );
        Ok(result)
    }

    /// Delete a note
    pub async fn delete_note(&self, id: &str) -> Result<DeleteResult, NoteError> {
        if self.options.strict_not_found && self.store.find_by_id(id).await?.is_empty() {
            return Err(NoteError::NotFound);
        }

        let result = self.store.delete_one(id).await?;
        info!(id, deleted = result.deleted_count, "note deleted from store");
        Ok(result)
    }
}
