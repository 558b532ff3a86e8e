use std::collections::HashSet;

use bson::oid::ObjectId;

use crate::db::models::BulkDecisionRequest;
use crate::error::ValidationError;

pub const REASON_MIN_CHARS: usize = 3;
pub const REASON_MAX_CHARS: usize = 500;

/// A decision payload that passed validation.
///
/// Only [`validate_decision`] builds one, so holders can rely on the ids being
/// trimmed, unique and well-formed and on the reason being within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    ids: Vec<String>,
    object_ids: Vec<ObjectId>,
    reason: String,
}

impl DecisionRequest {
    /// Distinct identifiers in first-seen order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn object_ids(&self) -> &[ObjectId] {
        &self.object_ids
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Number of distinct identifiers the caller asked for.
    pub fn requested(&self) -> usize {
        self.ids.len()
    }
}

/// Trim every identifier, drop blanks and keep the first occurrence of each.
pub fn normalize_ids<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|id| {
            let id = id.as_ref().trim();
            (!id.is_empty() && seen.insert(id.to_string())).then(|| id.to_string())
        })
        .collect()
}

/// Trim the reason and enforce its length bounds (in characters).
pub fn validate_reason(raw: &str) -> Result<String, ValidationError> {
    let reason = raw.trim();
    let len = reason.chars().count();

    if len == 0 {
        return Err(ValidationError::MissingReason);
    }
    if len < REASON_MIN_CHARS {
        return Err(ValidationError::ReasonTooShort {
            min: REASON_MIN_CHARS,
        });
    }
    if len > REASON_MAX_CHARS {
        return Err(ValidationError::ReasonTooLong {
            max: REASON_MAX_CHARS,
        });
    }

    Ok(reason.to_string())
}

/// Parse every identifier as an ObjectId. One bad token fails them all.
pub fn parse_object_ids(ids: &[String]) -> Result<Vec<ObjectId>, ValidationError> {
    ids.iter()
        .map(|id| ObjectId::parse_str(id).map_err(|_| ValidationError::InvalidDocumentIds))
        .collect()
}

/// Normalize and validate a raw decision payload. Pure; touches no store.
pub fn validate_decision(raw: &BulkDecisionRequest) -> Result<DecisionRequest, ValidationError> {
    let ids = normalize_ids(&raw.document_ids);
    if ids.is_empty() {
        return Err(ValidationError::MissingDocumentIds);
    }

    let reason = validate_reason(&raw.reason)?;
    let object_ids = parse_object_ids(&ids)?;

    Ok(DecisionRequest {
        ids,
        object_ids,
        reason,
    })
}
