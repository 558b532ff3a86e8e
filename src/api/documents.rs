use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::approval::service::{list_documents, process_decision};
use crate::db::models::{
    BulkApprovalResponse, BulkDecisionRequest, BulkRejectionResponse, Decision,
    DocumentListResponse, DocumentStatus, SeedResponse,
};
use crate::error::{AppError, ValidationError};
use crate::seed::seed_demo_data;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Query pairs of `POST /api/documents/seed`, kept as a list so repeated keys
/// never fail extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SeedQuery(pub Vec<(String, String)>);

impl SeedQuery {
    /// The first `reset` value decides; only `true` (any case) resets.
    fn reset(&self) -> bool {
        self.0
            .iter()
            .find(|(key, _)| key == "reset")
            .is_some_and(|(_, value)| value.trim().eq_ignore_ascii_case("true"))
    }
}

/// Axum handler for `GET /api/documents`.
pub async fn list_documents_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let Query(query) = query.map_err(|_| ValidationError::InvalidStatus)?;
    let status = DocumentStatus::parse_filter(query.status.as_deref())?;

    let data = list_documents(state.document_repo.as_ref(), status).await?;

    Ok(Json(DocumentListResponse {
        status_code: 200,
        data,
    }))
}

/// Axum handler for `POST /api/documents/approval`.
///
/// Only pending documents are approved; the rest are counted as requested but
/// left untouched.
pub async fn approve_documents_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkDecisionRequest>, JsonRejection>,
) -> Result<Json<BulkApprovalResponse>, AppError> {
    let Json(request) = payload.map_err(|_| ValidationError::InvalidBody)?;
    let outcome =
        process_decision(state.document_repo.as_ref(), &request, Decision::Approve).await?;

    Ok(Json(BulkApprovalResponse {
        status_code: 200,
        message: Decision::Approve.label().to_string(),
        requested: outcome.requested,
        approved: outcome.modified,
    }))
}

/// Axum handler for `POST /api/documents/rejection`.
pub async fn reject_documents_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkDecisionRequest>, JsonRejection>,
) -> Result<Json<BulkRejectionResponse>, AppError> {
    let Json(request) = payload.map_err(|_| ValidationError::InvalidBody)?;
    let outcome =
        process_decision(state.document_repo.as_ref(), &request, Decision::Reject).await?;

    Ok(Json(BulkRejectionResponse {
        status_code: 200,
        message: Decision::Reject.label().to_string(),
        requested: outcome.requested,
        rejected: outcome.modified,
    }))
}

/// Axum handler for `POST /api/documents/seed` (development aid).
pub async fn seed_documents_handler(
    State(state): State<AppState>,
    query: Result<Query<SeedQuery>, QueryRejection>,
) -> Result<Json<SeedResponse>, AppError> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let inserted = seed_demo_data(state.document_repo.as_ref(), query.reset()).await?;

    Ok(Json(SeedResponse {
        status_code: 200,
        message: "mock data seeded successfully".to_string(),
        inserted,
    }))
}
