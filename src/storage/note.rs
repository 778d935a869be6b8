use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, the unit timestamps are written in
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub time_created: i64,
    pub time_last_modified: i64,
}

impl Note {
    /// Create an untitled note with a fresh random ID, as the front end does on submit
    pub fn from_body(body: String) -> Self {
        let now = now_millis();

        Note {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: String::new(),
            body,
            color: None,
            time_created: now,
            time_last_modified: now,
        }
    }
}

/// A note as held by the document store, carrying the store's own key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    #[serde(rename = "_id")]
    pub store_id: String,
    #[serde(flatten)]
    pub note: Note,
}

impl StoredNote {
    /// Wrap a note under a new time-ordered store key
    pub fn assign(note: Note) -> Self {
        StoredNote {
            store_id: uuid::Uuid::now_v7().simple().to_string(),
            note,
        }
    }
}

/// Field replacements applied by an update; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub color: Option<String>,
    pub time_last_modified: i64,
}

impl NoteChanges {
    /// Apply the replacements, returning whether anything changed
    pub fn apply(&self, note: &mut Note) -> bool {
        let before = note.clone();

        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(body) = &self.body {
            note.body = body.clone();
        }
        if let Some(color) = &self.color {
            note.color = Some(color.clone());
        }
        note.time_last_modified = self.time_last_modified.max(note.time_created);

        *note != before
    }

    /// Build the note an upsert inserts when nothing matches `id`; `None`
    /// when the changes carry no title, since a stored note always has one
    pub fn into_note(self, id: &str) -> Option<Note> {
        let title = self.title.filter(|title| !title.is_empty())?;

        Some(Note {
            id: id.to_string(),
            title,
            body: self.body.unwrap_or_default(),
            color: self.color,
            time_created: self.time_last_modified,
            time_last_modified: self.time_last_modified,
        })
    }
}

/// Outcome of an update-one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl UpdateResult {
    pub fn matched(modified: bool) -> Self {
        UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn upserted(store_id: String) -> Self {
        UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(store_id),
        }
    }

    /// Neither matched nor inserted anything
    pub fn is_unmatched(&self) -> bool {
        self.matched_count == 0 && self.upserted_count == 0
    }

    pub fn unmatched() -> Self {
        UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

/// Outcome of a delete-one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn deleted(count: u64) -> Self {
        DeleteResult {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
