use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum NoteError {
    /// A request field failed the boundary check
    #[error("{0}")]
    Validation(String),

    #[error("Note not found!")]
    NotFound,

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl NoteError {
    pub fn title_required() -> Self {
        NoteError::Validation("Title required".to_string())
    }
}
