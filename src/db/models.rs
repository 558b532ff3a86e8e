use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Approval state of a document.
///
/// Serialized as `PENDING`, `APPROVED` or `REJECTED`, both in MongoDB and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [
        DocumentStatus::Pending,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "PENDING",
            DocumentStatus::Approved => "APPROVED",
            DocumentStatus::Rejected => "REJECTED",
        }
    }

    /// A decided document never changes status again.
    pub const fn is_terminal(self) -> bool {
        match self {
            DocumentStatus::Pending => false,
            DocumentStatus::Approved | DocumentStatus::Rejected => true,
        }
    }

    /// Only `Pending -> Approved` and `Pending -> Rejected` are legal.
    pub const fn can_transition_to(self, target: DocumentStatus) -> bool {
        match (self, target) {
            (DocumentStatus::Pending, DocumentStatus::Approved)
            | (DocumentStatus::Pending, DocumentStatus::Rejected) => true,
            (DocumentStatus::Pending, DocumentStatus::Pending)
            | (DocumentStatus::Approved, _)
            | (DocumentStatus::Rejected, _) => false,
        }
    }

    /// Parse the optional `status` query filter. Only an empty value means
    /// "no filter"; anything else must match exactly.
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<DocumentStatus>, ValidationError> {
        match raw {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ValidationError::InvalidStatus)
    }
}

/// A bulk decision and the terminal status it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub const fn target_status(self) -> DocumentStatus {
        match self {
            Decision::Approve => DocumentStatus::Approved,
            Decision::Reject => DocumentStatus::Rejected,
        }
    }

    /// Past-tense label used in response messages and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

/// A document stored in the `documents` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Human-readable code, e.g. `IT03-0001`.
    pub doc_no: String,
    pub title: String,
    pub status: DocumentStatus,
    /// Decision reason. Absent while the document is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// A fresh, undecided document.
    pub fn pending(
        doc_no: impl Into<String>,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            doc_no: doc_no.into(),
            title: title.into(),
            status: DocumentStatus::Pending,
            reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A document that was created already decided (fixtures only).
    pub fn decided(
        doc_no: impl Into<String>,
        title: impl Into<String>,
        decision: Decision,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            status: decision.target_status(),
            reason: Some(reason.into()),
            ..Self::pending(doc_no, title, now)
        }
    }
}

/// Transport representation of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub doc_no: String,
    pub title: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// UTC, ISO-8601 with whole seconds, e.g. `2026-02-16T04:58:52Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<Document> for DocumentDto {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            doc_no: doc.doc_no,
            title: doc.title,
            status: doc.status,
            reason: doc.reason.filter(|r| !r.is_empty()),
            created_at: format_timestamp(doc.created_at),
            updated_at: format_timestamp(doc.updated_at),
        }
    }
}

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Raw payload for `POST /api/documents/approval` and `/rejection`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkDecisionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: Vec<DocumentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkApprovalResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub requested: usize,
    pub approved: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRejectionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub requested: usize,
    pub rejected: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub inserted: u64,
}
