use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{DeleteResult, DocumentStore, Note, NoteChanges, StoreError, StoredNote, UpdateResult};

/// Document store backed by a directory holding one JSON file per document
#[derive(Debug)]
pub struct JsonDirStore {
    notes_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonDirStore {
            notes_dir: data_dir.into().join("notes"),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store, creating the notes directory if needed
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(data_dir);
        tokio::fs::create_dir_all(&store.notes_dir).await?;
        Ok(store)
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    fn document_path(&self, store_id: &str) -> PathBuf {
        self.notes_dir.join(format!("{}.json", store_id))
    }

    /// Load every document with the file it was read from, sorted by store key
    async fn load_all(&self) -> Result<Vec<(PathBuf, StoredNote)>, StoreError> {
        let mut documents = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.notes_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(documents),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Deleted between listing and reading
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let document: StoredNote = serde_json::from_str(&content)
                .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
            documents.push((path, document));
        }

        documents.sort_by(|(_, a), (_, b)| a.store_id.cmp(&b.store_id));
        Ok(documents)
    }

    async fn write_document(&self, path: &Path, document: &StoredNote) -> Result<(), StoreError> {
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    async fn find_all(&self) -> Result<Vec<StoredNote>, StoreError> {
        Ok(self.load_all().await?.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<StoredNote>, StoreError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .map(|(_, doc)| doc)
            .filter(|doc| doc.note.id == id)
            .collect())
    }

    async fn insert(&self, note: Note) -> Result<StoredNote, StoreError> {
        let _guard = self.write_lock.lock().await;

        let stored = StoredNote::assign(note);
        self.write_document(&self.document_path(&stored.store_id), &stored)
            .await?;
        Ok(stored)
    }

    async fn update_one(
        &self,
        id: &str,
        changes: NoteChanges,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .load_all()
            .await?
            .into_iter()
            .find(|(_, doc)| doc.note.id == id);

        match existing {
            Some((path, mut doc)) => {
                let modified = changes.apply(&mut doc.note);
                if modified {
                    self.write_document(&path, &doc).await?;
                }
                Ok(UpdateResult::matched(modified))
            }
            None if upsert => match changes.into_note(id) {
                Some(note) => {
                    let stored = StoredNote::assign(note);
                    self.write_document(&self.document_path(&stored.store_id), &stored)
                        .await?;
                    Ok(UpdateResult::upserted(stored.store_id))
                }
                None => Ok(UpdateResult::unmatched()),
            },
            None => Ok(UpdateResult::unmatched()),
        }
    }

    async fn delete_one(&self, id: &str) -> Result<DeleteResult, StoreError> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .load_all()
            .await?
            .into_iter()
            .find(|(_, doc)| doc.note.id == id);

        match existing {
            Some((path, _)) => {
                tokio::fs::remove_file(&path).await?;
                Ok(DeleteResult::deleted(1))
            }
            None => Ok(DeleteResult::deleted(0)),
        }
    }
}
