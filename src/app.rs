use std::sync::Arc;

use crate::db::repository::DocumentRepository;

/// Shared state handed to every request handler.
///
/// The repository is constructed once in `main` and injected here; handlers
/// never reach for a global connection.
#[derive(Clone)]
pub struct AppState {
    pub document_repo: Arc<dyn DocumentRepository>,
}

impl AppState {
    pub fn new(document_repo: Arc<dyn DocumentRepository>) -> Self {
        Self { document_repo }
    }
}
