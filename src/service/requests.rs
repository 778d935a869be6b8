use serde::Deserialize;

use super::errors::NoteError;
use crate::storage::note::now_millis;
use crate::storage::{Note, NoteChanges};

/// Body of `POST /notes`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub color: Option<String>,
    pub time_created: Option<i64>,
    pub time_last_modified: Option<i64>,
}

impl CreateNoteRequest {
    /// Validate the request and build the note to insert
    pub fn into_note(self) -> Result<Note, NoteError> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(NoteError::title_required()),
        };

        let time_created = self.time_created.unwrap_or_else(now_millis);
        let time_last_modified = self
            .time_last_modified
            .unwrap_or(time_created)
            .max(time_created);

        Ok(Note {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()),
            title,
            body: self.body.unwrap_or_default(),
            color: self.color,
            time_created,
            time_last_modified,
        })
    }
}

/// Body of `PUT /notes/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub color: Option<String>,
    pub time_last_modified: Option<i64>,
}

impl UpdateNoteRequest {
    /// Validate the request. A missing title is left for the store to judge,
    /// since it only matters when the update ends up inserting.
    pub fn into_changes(self) -> Result<NoteChanges, NoteError> {
        if self.title.as_deref() == Some("") {
            return Err(NoteError::title_required());
        }

        Ok(NoteChanges {
            title: self.title,
            body: self.body,
            color: self.color,
            time_last_modified: self.time_last_modified.unwrap_or_else(now_millis),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_without_title_is_rejected() {
        let request = CreateNoteRequest {
            id: Some("x".to_string()),
            body: Some("text".to_string()),
            ..Default::default()
        };
        let err = request.into_note().unwrap_err();
        assert_eq!(err.to_string(), "Title required");

        let empty = CreateNoteRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(empty.into_note(), Err(NoteError::Validation(_))));
    }

    #[test]
    fn create_fills_missing_fields() {
        let note = CreateNoteRequest {
            title: Some("T".to_string()),
            time_created: Some(10),
            time_last_modified: Some(3),
            ..Default::default()
        }
        .into_note()
        .unwrap();

        assert!(!note.id.is_empty());
        assert_eq!(note.body, "");
        assert_eq!(note.time_created, 10);
        assert_eq!(note.time_last_modified, 10);
    }

    #[test]
    fn update_rejects_blank_title_and_passes_missing_one() {
        let blank = UpdateNoteRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = blank.into_changes().unwrap_err();
        assert_eq!(err.to_string(), "Title required");

        let changes = UpdateNoteRequest {
            body: Some("b".to_string()),
            time_last_modified: Some(7),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.title, None);
        assert_eq!(changes.body.as_deref(), Some("b"));
        assert_eq!(changes.time_last_modified, 7);
    }
}
