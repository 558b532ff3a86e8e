use chrono::{DateTime, Utc};

use crate::db::models::{Decision, Document};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;

pub const PENDING_COUNT: usize = 15;
pub const APPROVED_COUNT: usize = 5;
pub const REJECTED_COUNT: usize = 5;

pub const APPROVED_REASON: &str = "Approved by IT manager";
pub const REJECTED_REASON: &str = "Not compliant with IT policy";

fn doc_no(n: usize) -> String {
    format!("IT03-{n:04}")
}

/// The fixed development fixture: 15 pending, 5 approved, 5 rejected,
/// numbered `IT03-0001` to `IT03-0025`, all created at `now`.
pub fn demo_documents(now: DateTime<Utc>) -> Vec<Document> {
    let approved_start = PENDING_COUNT + 1;
    let rejected_start = approved_start + APPROVED_COUNT;
    let total = PENDING_COUNT + APPROVED_COUNT + REJECTED_COUNT;

    (1..=total)
        .map(|n| {
            if n < approved_start {
                Document::pending(doc_no(n), format!("IT Equipment Request {n}"), now)
            } else if n < rejected_start {
                Document::decided(
                    doc_no(n),
                    format!("Approved Request {n}"),
                    Decision::Approve,
                    APPROVED_REASON,
                    now,
                )
            } else {
                Document::decided(
                    doc_no(n),
                    format!("Rejected Request {n}"),
                    Decision::Reject,
                    REJECTED_REASON,
                    now,
                )
            }
        })
        .collect()
}

/// Optionally wipe the collection, then insert the demo fixture.
///
/// Returns the number of inserted documents.
pub async fn seed_demo_data(repo: &dyn DocumentRepository, reset: bool) -> Result<u64, AppError> {
    tracing::info!(reset, "Starting demo data seeding...");

    if reset {
        let removed = repo
            .delete_all()
            .await
            .map_err(|e| AppError::Reset(e.to_string()))?;
        tracing::info!(removed, "Documents collection reset");
    }

    let inserted = repo.insert_many(demo_documents(Utc::now())).await?;
    tracing::info!(inserted, "Demo data seeding completed.");

    Ok(inserted)
}
