// End-to-end reconciliation tests against a mock MinIO admin API.
#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use miosync_api::{AdminClient, Credentials, TransportConfig};
use miosync_core::error::CoreError;
use miosync_core::{
    reconcile_group, reconcile_policy, reconcile_retention, reconcile_user, GroupSpec, GroupState,
    PolicySpec, PolicyState, RetentionMode, RetentionSpec, RetentionState, UserSpec, UserState,
};

async fn setup() -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let credentials = Credentials::new("minio", SecretString::from("minio123"));
    let client = AdminClient::new(
        server.uri().parse().unwrap(),
        credentials,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn no_such(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "Code": code,
        "Message": "resource does not exist"
    }))
}

#[tokio::test]
async fn missing_group_is_created_with_members() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/group"))
        .respond_with(no_such("XMinioAdminNoSuchGroup"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/minio/admin/v3/update-group-members"))
        .and(body_json(json!({
            "group": "ops",
            "members": ["alice", "bob"],
            "isRemove": false
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let spec = GroupSpec {
        name: "ops".to_owned(),
        state: GroupState::Present,
        users: Some(vec!["alice".to_owned(), "bob".to_owned()]),
    };
    let outcome = reconcile_group(&client, &spec, false).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.message, "group 'ops' created");
    assert_eq!(outcome.diff.before, "");
    assert!(outcome.diff.after.contains("members"));
}

#[tokio::test]
async fn preview_reports_a_change_without_mutating() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "ops",
            "status": "enabled",
            "members": ["alice"]
        })))
        .mount(&server)
        .await;
    // No write may reach the server in preview mode.
    Mock::given(method("PUT"))
        .and(path("/minio/admin/v3/update-group-members"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let spec = GroupSpec {
        name: "ops".to_owned(),
        state: GroupState::Present,
        users: Some(vec!["alice".to_owned(), "bob".to_owned()]),
    };
    let outcome = reconcile_group(&client, &spec, true).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.message, "group 'ops': members added");
    server.verify().await;
}

#[tokio::test]
async fn matching_group_reports_no_change() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/group"))
        .and(query_param("group", "ops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "ops",
            "status": "enabled",
            "members": ["bob", "alice"],
            "policy": "readwrite",
            "updatedAt": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let spec = GroupSpec {
        name: "ops".to_owned(),
        state: GroupState::Present,
        users: Some(vec!["alice".to_owned(), "bob".to_owned()]),
    };
    let outcome = reconcile_group(&client, &spec, false).await.unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.message, "group 'ops' is already up to date");
    assert_eq!(outcome.diff.before, outcome.diff.after);
}

#[tokio::test]
async fn existing_user_is_not_touched() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/user-info"))
        .and(query_param("accessKey", "svc-backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "enabled" })))
        .mount(&server)
        .await;

    let spec = UserSpec {
        access_key: "svc-backup".to_owned(),
        state: UserState::Present,
        secret_key: Some(SecretString::from("hunter2hunter2")),
    };
    let outcome = reconcile_user(&client, &spec, false).await.unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.message, "user 'svc-backup' already exists");
}

#[tokio::test]
async fn creating_a_user_requires_a_secret_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/user-info"))
        .respond_with(no_such("XMinioAdminNoSuchUser"))
        .mount(&server)
        .await;

    let spec = UserSpec {
        access_key: "svc-backup".to_owned(),
        state: UserState::Present,
        secret_key: None,
    };
    let err = reconcile_user(&client, &spec, false).await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidSpec(_)));
}

#[tokio::test]
async fn unchanged_policy_still_attaches_principals() {
    let (server, client) = setup().await;

    let document = json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": ["s3:GetObject"],
            "Resource": ["arn:aws:s3:::data/*"]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/info-canned-policy"))
        .and(query_param("name", "readonly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/minio/admin/v3/idp/builtin/policy/attach"))
        .and(body_json(json!({
            "policies": ["readonly-data"],
            "user": "alice"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let spec = PolicySpec {
        name: "readonly-data".to_owned(),
        state: PolicyState::Present,
        statements: Some(document["Statement"].as_array().unwrap().clone()),
        users: vec!["alice".to_owned()],
        groups: Vec::new(),
    };
    let outcome = reconcile_policy(&client, &spec, false).await.unwrap();

    // Document unchanged, but the association write still counts.
    assert!(outcome.changed);
    server.verify().await;
}

#[tokio::test]
async fn retention_writes_the_lock_configuration() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/archive"))
        .and(query_param("object-lock", ""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RetentionSpec {
        bucket: "archive".to_owned(),
        state: RetentionState::Present,
        mode: Some(RetentionMode::Governance),
        days: Some(30),
    };
    let outcome = reconcile_retention(&client, &spec, false).await.unwrap();

    assert!(outcome.changed);
    assert!(outcome.diff.after.contains("GOVERNANCE"));
}

#[tokio::test]
async fn fetch_failure_is_not_treated_as_absence() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/group"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "Code": "XMinioAccessDenied",
            "Message": "access denied"
        })))
        .mount(&server)
        .await;

    let spec = GroupSpec {
        name: "ops".to_owned(),
        state: GroupState::Present,
        users: None,
    };
    let err = reconcile_group(&client, &spec, false).await.unwrap_err();

    match err {
        CoreError::Fetch { resource, .. } => assert_eq!(resource, "group 'ops'"),
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn apply_failure_carries_the_planned_outcome() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/minio/admin/v3/group"))
        .respond_with(no_such("XMinioAdminNoSuchGroup"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/minio/admin/v3/update-group-members"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let spec = GroupSpec {
        name: "ops".to_owned(),
        state: GroupState::Present,
        users: Some(vec!["alice".to_owned()]),
    };
    let err = reconcile_group(&client, &spec, false).await.unwrap_err();

    match err {
        CoreError::Apply {
            operation, outcome, ..
        } => {
            assert_eq!(operation, "create group");
            assert!(outcome.changed);
        }
        other => panic!("expected Apply error, got {other:?}"),
    }
}
