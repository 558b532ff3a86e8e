use chrono::Utc;

use crate::approval::validation::{validate_decision, DecisionRequest};
use crate::db::models::{BulkDecisionRequest, Decision, DocumentDto, DocumentStatus};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;

/// Result of a bulk decision.
///
/// `modified < requested` means some ids were already decided or do not exist;
/// that is reported, not treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub requested: usize,
    pub modified: u64,
}

impl DecisionOutcome {
    pub fn skipped(&self) -> u64 {
        (self.requested as u64).saturating_sub(self.modified)
    }
}

/// List documents, optionally restricted to one status, as transport DTOs.
pub async fn list_documents(
    repo: &dyn DocumentRepository,
    status: Option<DocumentStatus>,
) -> Result<Vec<DocumentDto>, AppError> {
    let docs = repo.find(status).await?;
    Ok(docs.into_iter().map(DocumentDto::from).collect())
}

/// Apply an already validated decision as one conditional bulk update.
pub async fn execute_decision(
    repo: &dyn DocumentRepository,
    request: &DecisionRequest,
    decision: Decision,
) -> Result<DecisionOutcome, AppError> {
    let modified = repo
        .decide_pending(
            request.object_ids(),
            decision.target_status(),
            request.reason(),
            Utc::now(),
        )
        .await?;

    let outcome = DecisionOutcome {
        decision,
        requested: request.requested(),
        modified,
    };

    if outcome.skipped() > 0 {
        tracing::warn!(
            decision = decision.label(),
            requested = outcome.requested,
            modified = outcome.modified,
            "some documents were not pending and were left untouched"
        );
    } else {
        tracing::info!(
            decision = decision.label(),
            requested = outcome.requested,
            modified = outcome.modified,
            "bulk decision applied"
        );
    }

    Ok(outcome)
}

/// Validate a raw payload and apply the decision. Invalid input never reaches the store.
pub async fn process_decision(
    repo: &dyn DocumentRepository,
    raw: &BulkDecisionRequest,
    decision: Decision,
) -> Result<DecisionOutcome, AppError> {
    let request = validate_decision(raw)?;
    execute_decision(repo, &request, decision).await
}
