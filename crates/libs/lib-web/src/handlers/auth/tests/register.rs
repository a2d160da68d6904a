//! # Register Tests

use super::*;

#[tokio::test]
async fn test_register_success_sets_cookie() {
    // Arrange
    let app = test_app();

    // Act
    let res = app
        .oneshot(json_req(Method::POST, "/api/v1/register", None, &register_body("alice", "a@x.com")))
        .await
        .unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(session_cookie(&res).is_some());

    let body = body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "user created successfully");
}

#[tokio::test]
async fn test_register_token_identifies_new_account() {
    // Arrange
    let app = test_app();
    let token = register(&app, "alice", "a@x.com").await;

    // Act
    let claims = lib_auth::decode_token(&token, TEST_SECRET).unwrap();
    let res = app.oneshot(get_req("/api/v1/me", Some(&token))).await.unwrap();

    // Assert
    let body = body_json(res).await;
    assert_eq!(body["user"]["_id"].as_i64(), Some(claims.user_id().unwrap()));
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_or_username_conflicts() {
    // Arrange
    let app = test_app();
    register(&app, "alice", "a@x.com").await;

    // Act
    let same_email = app
        .clone()
        .oneshot(json_req(Method::POST, "/api/v1/register", None, &register_body("alice2", "a@x.com")))
        .await
        .unwrap();
    let same_username = app
        .clone()
        .oneshot(json_req(Method::POST, "/api/v1/register", None, &register_body("alice", "other@x.com")))
        .await
        .unwrap();

    // Assert
    assert_eq!(same_email.status(), StatusCode::CONFLICT);
    assert_eq!(same_username.status(), StatusCode::CONFLICT);
    assert!(set_cookie_header(&same_email).is_none());

    let body = body_json(same_email).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "user already exists, please login");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = test_app();

    let cases = [
        json!({ "first_name": "A", "last_name": "B", "username": "alice", "email": "a@x.com" }),
        json!({ "first_name": "A", "last_name": "B", "username": "alice", "email": "not-an-email", "password": "secret1" }),
        json!({ "first_name": "A", "last_name": "B", "username": "alice", "email": "a@x.com", "password": "short" }),
        json!({ "first_name": "A", "last_name": "B", "username": "alice", "email": "a@x.com", "password": "much-too-long-password" }),
        json!({ "last_name": "B", "username": "alice", "email": "a@x.com", "password": "secret1" }),
    ];

    for body in cases {
        let res = app
            .clone()
            .oneshot(json_req(Method::POST, "/api/v1/register", None, &body))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", body);
        assert_eq!(body_json(res).await["success"], false);
    }
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = test_app();

    let res = app
        .oneshot(
            axum::http::Request::builder()
                .method(Method::POST)
                .uri("/api/v1/register")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["success"], false);
}
