mod common;

use docflow::db::models::DocumentStatus;

async fn decide(
    server: &axum_test::TestServer,
    path: &str,
    ids: &[String],
    reason: &str,
) -> axum_test::TestResponse {
    server
        .post(path)
        .json(&serde_json::json!({ "document_ids": ids, "reason": reason }))
        .await
}

#[tokio::test]
async fn approve_two_pending_documents() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let ids = vec![pending[0].clone(), pending[1].clone()];

    let body: serde_json::Value =
        decide(&server, "/api/documents/approval", &ids, "Approved by manager")
            .await
            .json();
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "approved");
    assert_eq!(body["requested"], 2);
    assert_eq!(body["approved"], 2);

    let approved = env.list(&server, Some("APPROVED")).await;
    for id in &ids {
        let doc = approved.iter().find(|d| &d.id == id).expect("document should be approved");
        assert_eq!(doc.reason.as_deref(), Some("Approved by manager"));
        assert!(doc.updated_at >= doc.created_at);
    }
    assert_eq!(env.ids_with_status(&server, "PENDING").await.len(), 13);
}

#[tokio::test]
async fn reject_pending_documents() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let body: serde_json::Value =
        decide(&server, "/api/documents/rejection", &pending[..3], "Out of budget")
            .await
            .json();
    assert_eq!(body["message"], "rejected");
    assert_eq!(body["requested"], 3);
    assert_eq!(body["rejected"], 3);

    assert_eq!(env.ids_with_status(&server, "REJECTED").await.len(), 8);
}

#[tokio::test]
async fn second_identical_approval_modifies_nothing() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let ids = env.ids_with_status(&server, "PENDING").await[..4].to_vec();

    let first: serde_json::Value =
        decide(&server, "/api/documents/approval", &ids, "Looks good").await.json();
    let second: serde_json::Value =
        decide(&server, "/api/documents/approval", &ids, "Looks good again").await.json();

    assert_eq!(first["approved"], 4);
    assert_eq!(second["requested"], 4);
    assert_eq!(second["approved"], 0);

    // The first reason sticks.
    let approved = env.list(&server, Some("APPROVED")).await;
    for id in &ids {
        let doc = approved.iter().find(|d| &d.id == id).unwrap();
        assert_eq!(doc.reason.as_deref(), Some("Looks good"));
    }
}

#[tokio::test]
async fn decided_documents_cannot_be_flipped() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let rejected = env.ids_with_status(&server, "REJECTED").await;
    let body: serde_json::Value =
        decide(&server, "/api/documents/approval", &rejected, "Overrule")
            .await
            .json();
    assert_eq!(body["requested"], 5);
    assert_eq!(body["approved"], 0);

    let still_rejected = env.list(&server, Some("REJECTED")).await;
    assert_eq!(still_rejected.len(), 5);
    assert!(still_rejected
        .iter()
        .all(|d| d.reason.as_deref() == Some("Not compliant with IT policy")));
}

#[tokio::test]
async fn duplicates_and_blanks_are_normalized() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let ids = vec![
        pending[0].clone(),
        format!("  {}  ", pending[0]),
        String::new(),
        pending[1].clone(),
    ];

    let body: serde_json::Value =
        decide(&server, "/api/documents/approval", &ids, "Approved by manager")
            .await
            .json();
    assert_eq!(body["requested"], 2);
    assert_eq!(body["approved"], 2);
}

#[tokio::test]
async fn unknown_ids_count_as_requested_only() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let ids = vec![pending[0].clone(), "000000000000000000000000".to_string()];

    let body: serde_json::Value =
        decide(&server, "/api/documents/rejection", &ids, "Missing quote")
            .await
            .json();
    assert_eq!(body["requested"], 2);
    assert_eq!(body["rejected"], 1);
}

#[tokio::test]
async fn reason_length_boundaries() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;

    let too_short = decide(&server, "/api/documents/approval", &pending[..1], "ab").await;
    too_short.assert_status_bad_request();
    let body: serde_json::Value = too_short.json();
    assert_eq!(body["message"], "reason must be at least 3 characters");

    let long_reason = "x".repeat(501);
    let too_long = decide(&server, "/api/documents/approval", &pending[..1], &long_reason).await;
    too_long.assert_status_bad_request();
    let body: serde_json::Value = too_long.json();
    assert_eq!(body["message"], "reason must be <= 500 characters");

    let min = decide(&server, "/api/documents/approval", &pending[..1], "abc").await;
    min.assert_status_ok();

    let max = decide(&server, "/api/documents/approval", &pending[1..2], &"x".repeat(500)).await;
    max.assert_status_ok();

    assert_eq!(env.ids_with_status(&server, "PENDING").await.len(), 13);
}

#[tokio::test]
async fn validation_errors_have_distinct_messages() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let cases = [
        (
            serde_json::json!({ "document_ids": [], "reason": "fine reason" }),
            "document_ids is required",
        ),
        (
            serde_json::json!({ "document_ids": ["  "], "reason": "fine reason" }),
            "document_ids is required",
        ),
        (
            serde_json::json!({ "document_ids": [pending[0]], "reason": "   " }),
            "reason is required",
        ),
        (
            serde_json::json!({
                "document_ids": [pending[0], "not-an-id"],
                "reason": "fine reason",
            }),
            "invalid document_ids",
        ),
    ];

    for (payload, message) in cases {
        let response = server.post("/api/documents/approval").json(&payload).await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"], message, "payload: {payload}");
    }

    // A malformed id anywhere means nothing was decided.
    assert_eq!(env.ids_with_status(&server, "PENDING").await.len(), 15);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/documents/rejection")
        .text("{ not json")
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "invalid body");
}

#[tokio::test]
async fn concurrent_overlapping_decisions_pick_one_state() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    env.seed(&server, true).await;

    let pending = env.ids_with_status(&server, "PENDING").await;
    let approve_ids = pending[..10].to_vec();
    let reject_ids = pending[5..].to_vec();

    let (approve, reject) = tokio::join!(
        decide(&server, "/api/documents/approval", &approve_ids, "Approve batch"),
        decide(&server, "/api/documents/rejection", &reject_ids, "Reject batch"),
    );
    let approve: serde_json::Value = approve.json();
    let reject: serde_json::Value = reject.json();

    // Every pending document is decided exactly once.
    let approved = approve["approved"].as_u64().unwrap();
    let rejected = reject["rejected"].as_u64().unwrap();
    assert_eq!(approved + rejected, 15);

    let docs = env.repo.find(None).await.unwrap();
    assert!(docs.iter().all(|d| d.status != DocumentStatus::Pending));
    for doc in docs.iter().filter(|d| d.doc_no.as_str() <= "IT03-0015") {
        let expected_reason = match doc.status {
            DocumentStatus::Approved => "Approve batch",
            DocumentStatus::Rejected => "Reject batch",
            DocumentStatus::Pending => unreachable!(),
        };
        assert_eq!(doc.reason.as_deref(), Some(expected_reason));
    }
    assert_eq!(
        docs.iter().filter(|d| d.status == DocumentStatus::Approved).count() as u64,
        5 + approved
    );
}
