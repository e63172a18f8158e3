//! Organisation visibility and membership tests
mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_users_only_see_their_organisations() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;
    let jane = ctx.register("Jane").await;

    let (status, body) = ctx.get("/api/organisations", Some(&jane.token)).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body["data"]["organisations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["orgId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![jane.default_org_id.as_str()]);
    assert!(!ids.contains(&john.default_org_id.as_str()));
}

#[tokio::test]
async fn test_non_member_cannot_fetch_organisation() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;
    let jane = ctx.register("Jane").await;

    let (status, body) = ctx
        .get(
            &format!("/api/organisations/{}", john.default_org_id),
            Some(&jane.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": "Not found", "message": "Organization not found", "statusCode": 404 })
    );

    let (status, body) = ctx
        .get(
            &format!("/api/organisations/{}", john.default_org_id),
            Some(&john.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Organization retrieved successfully");
    assert_eq!(body["data"]["name"], "John's Organization");
}

#[tokio::test]
async fn test_unknown_and_malformed_org_ids() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;

    let (status, _) = ctx
        .get(
            &format!("/api/organisations/{}", Uuid::new_v4()),
            Some(&john.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .get("/api/organisations/definitely-not-a-uuid", Some(&john.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_organisation() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;

    let (status, body) = ctx
        .post(
            "/api/organisations",
            Some(&john.token),
            json!({ "name": "Acme", "description": "Rockets" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Organization created successfully");
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["description"], "Rockets");

    let (_, list) = ctx.get("/api/organisations", Some(&john.token)).await;
    let names: Vec<&str> = list["data"]["organisations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John's Organization", "Acme"]);
}

#[tokio::test]
async fn test_create_organisation_requires_name() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;

    for body in [json!({}), json!({ "name": "   " }), json!({ "name": null })] {
        let (status, response) = ctx
            .post("/api/organisations", Some(&john.token), body)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["errors"][0]["field"], "name");
    }
    assert_eq!(ctx.store.organisation_count().await, 1);
}

#[tokio::test]
async fn test_add_member_grants_visibility() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;
    let jane = ctx.register("Jane").await;

    let (status, body) = ctx
        .post(
            &format!("/api/organisations/{}/users", john.default_org_id),
            Some(&john.token),
            json!({ "userId": jane.user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "success", "message": "User added to organization successfully" })
    );

    let (status, _) = ctx
        .get(
            &format!("/api/organisations/{}", john.default_org_id),
            Some(&jane.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_add_member_unknown_references() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;

    let (status, body) = ctx
        .post(
            &format!("/api/organisations/{}/users", john.default_org_id),
            Some(&john.token),
            json!({ "userId": Uuid::new_v4().to_string() }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User or organization not found");

    let (status, _) = ctx
        .post(
            &format!("/api/organisations/{}/users", Uuid::new_v4()),
            Some(&john.token),
            json!({ "userId": john.user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_member_malformed_user_id() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;
    let uri = format!("/api/organisations/{}/users", john.default_org_id);

    for body in [
        json!({}),
        json!({ "userId": "12345" }),
        json!({ "userId": 12345 }),
        json!({ "userId": null }),
    ] {
        let (status, response) = ctx.post(&uri, Some(&john.token), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["errors"][0]["field"], "userId");
    }
}

#[tokio::test]
async fn test_restricted_invites_require_membership() {
    let ctx = TestContext::with_env(&[("RESTRICT_INVITES", "true")]);
    let john = ctx.register("John").await;
    let jane = ctx.register("Jane").await;

    let (status, _) = ctx
        .post(
            &format!("/api/organisations/{}/users", john.default_org_id),
            Some(&jane.token),
            json!({ "userId": jane.user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .post(
            &format!("/api/organisations/{}/users", john.default_org_id),
            Some(&john.token),
            json!({ "userId": jane.user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_add_member_lists_organisation_once() {
    let ctx = TestContext::new();
    let john = ctx.register("John").await;
    let jane = ctx.register("Jane").await;
    let uri = format!("/api/organisations/{}/users", john.default_org_id);

    for _ in 0..2 {
        let (status, _) = ctx
            .post(&uri, Some(&john.token), json!({ "userId": jane.user_id }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = ctx.get("/api/organisations", Some(&jane.token)).await;
    let ids: Vec<&str> = body["data"]["organisations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["orgId"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![jane.default_org_id.as_str(), john.default_org_id.as_str()]
    );
}
