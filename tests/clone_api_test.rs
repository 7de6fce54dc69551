//! HTTP API tests driven through the router against a scripted tracker.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use epic_cloner::adapters::http::build_router;
use epic_cloner::adapters::mock::TrackerCall;
use epic_cloner::domain::models::TemplateIssue;
use epic_cloner::infrastructure::logging::SecretScrubber;
use epic_cloner::{EpicCloneService, MockIssueTracker, TrackerError};

const MISSING: &str = "Missing required fields: templateEpicKey, targetProjectKey, newEpicSummary";

fn router(tracker: &Arc<MockIssueTracker>) -> Router {
    let service = EpicCloneService::new(tracker.clone());
    build_router(service, SecretScrubber::new().unwrap())
}

fn child(key: &str, summary: &str, type_id: &str) -> TemplateIssue {
    TemplateIssue {
        id: format!("id-{key}"),
        key: key.to_string(),
        summary: summary.to_string(),
        issue_type_id: type_id.to_string(),
        issue_type_name: None,
    }
}

fn clone_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/clone-epic")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn valid_body() -> String {
    json!({
        "templateEpicKey": "TPL-1",
        "targetProjectKey": "TGT",
        "newEpicSummary": "Q3 launch"
    })
    .to_string()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_liveness() {
    let tracker = Arc::new(MockIssueTracker::new());
    let response = router(&tracker)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        "Epic cloner API is live. POST /clone-epic to clone an epic."
    );
    assert!(tracker.calls().await.is_empty());
}

#[tokio::test]
async fn test_missing_fields_rejected_without_calls() {
    let tracker = Arc::new(MockIssueTracker::new());

    let bodies = [
        String::new(),
        "{}".to_string(),
        json!({"templateEpicKey": "TPL-1", "targetProjectKey": "TGT"}).to_string(),
        json!({"templateEpicKey": "TPL-1", "targetProjectKey": "", "newEpicSummary": "x"})
            .to_string(),
        json!({"templateEpicKey": "  ", "targetProjectKey": "TGT", "newEpicSummary": "x"})
            .to_string(),
        "not json".to_string(),
    ];

    for body in bodies {
        let (status, json) = send(router(&tracker), clone_request(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert_eq!(json, json!({"error": MISSING}), "body: {body:?}");
    }

    assert!(tracker.calls().await.is_empty());
}

#[tokio::test]
async fn test_clone_without_children() {
    let tracker =
        Arc::new(MockIssueTracker::new().with_epic_field("TGT", "customfield_10011", "Epic Name"));

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"ok": true, "newEpicKey": "TGT-100", "createdChildren": []})
    );

    // Both query dialects were tried before giving up
    assert_eq!(
        tracker.searches().await,
        ["parentEpic = TPL-1", "\"Epic Link\" = TPL-1"]
    );
    assert_eq!(tracker.created_issues().await.len(), 1);
}

#[tokio::test]
async fn test_clone_with_children_keeps_order() {
    let tracker = Arc::new(
        MockIssueTracker::new()
            .with_epic_field("TGT", "customfield_10011", "Epic Name")
            .with_search_results(
                "parentEpic = TPL-1",
                vec![
                    child("TPL-7", "Design", "10001"),
                    child("TPL-3", "Build", "10002"),
                    child("TPL-5", "Ship", "10001"),
                ],
            ),
    );

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "ok": true,
            "newEpicKey": "TGT-100",
            "createdChildren": ["TGT-101", "TGT-102", "TGT-103"]
        })
    );

    let created = tracker.created_issues().await;
    let summaries: Vec<&str> = created.iter().map(|i| i.summary.as_str()).collect();
    assert_eq!(summaries, ["Q3 launch", "Design", "Build", "Ship"]);
    for issue in &created[1..] {
        assert_eq!(issue.parent_key.as_deref(), Some("TGT-100"));
        assert_eq!(issue.project_key, "TGT");
        assert!(issue.custom_fields.is_empty());
    }
}

#[tokio::test]
async fn test_epic_link_dialect_used_when_parent_query_is_empty() {
    let tracker = Arc::new(
        MockIssueTracker::new()
            .with_epic_field("TGT", "customfield_10011", "Epic Name")
            .with_search_results(
                "\"Epic Link\" = TPL-1",
                vec![child("TPL-2", "Legacy child", "10003")],
            ),
    );

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["createdChildren"], json!(["TGT-101"]));
}

#[tokio::test]
async fn test_epic_failure_returns_provider_details() {
    let provider_body = json!({
        "errorMessages": [],
        "errors": {"customfield_10011": "Field cannot be set."}
    });
    let tracker = Arc::new(MockIssueTracker::new().failing_create_issue_at(
        1,
        TrackerError::Api {
            operation: "create_issue",
            status: 400,
            body: provider_body.clone(),
        },
    ));

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"error": "Failed to clone epic. See server logs.", "details": provider_body})
    );
    assert!(tracker.searches().await.is_empty());
}

#[tokio::test]
async fn test_transport_failure_details_are_message() {
    let tracker = Arc::new(MockIssueTracker::new().failing_create_meta(TrackerError::Transport {
        operation: "create_meta",
        message: "connection refused".to_string(),
    }));

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["details"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
    assert!(tracker.created_issues().await.is_empty());
}

#[tokio::test]
async fn test_child_failure_stops_and_hides_progress() {
    let tracker = Arc::new(
        MockIssueTracker::new()
            .with_epic_field("TGT", "customfield_10011", "Epic Name")
            .with_search_results(
                "parentEpic = TPL-1",
                vec![
                    child("TPL-2", "One", "10001"),
                    child("TPL-3", "Two", "10001"),
                    child("TPL-4", "Three", "10001"),
                ],
            )
            .failing_create_issue_at(
                3,
                TrackerError::Api {
                    operation: "create_issue",
                    status: 400,
                    body: json!({"errors": {"issuetype": "Specify a valid issue type"}}),
                },
            ),
    );

    let (status, json) = send(router(&tracker), clone_request(valid_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["details"],
        json!({"errors": {"issuetype": "Specify a valid issue type"}})
    );
    assert!(json.get("createdChildren").is_none());
    assert!(json.get("newEpicKey").is_none());

    // Epic, first child, then the failing second child; the third is never tried
    let creates = tracker
        .calls()
        .await
        .into_iter()
        .filter(|call| matches!(call, TrackerCall::CreateIssue(_)))
        .count();
    assert_eq!(creates, 3);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let tracker = Arc::new(MockIssueTracker::new());
    let response = router(&tracker)
        .oneshot(
            Request::builder()
                .uri("/clone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
