pub mod errors;
pub mod handlers;
mod request_tracing;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::service::NoteService;

#[derive(Clone)]
pub struct AppState {
    pub service: NoteService,
}

impl AppState {
    pub fn new(service: NoteService) -> Self {
        AppState { service }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .layer(middleware::from_fn(request_tracing::request_tracing_middleware))
        .with_state(state)
}
