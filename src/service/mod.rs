pub mod errors;
pub mod note_service;
pub mod requests;

pub use errors::NoteError;
pub use note_service::{NoteService, ServiceOptions};
pub use requests::{CreateNoteRequest, UpdateNoteRequest};
