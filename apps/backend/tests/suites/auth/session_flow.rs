use actix_web::http::StatusCode;
use actix_web::test;
use conduit::auth::verify_session_token;
use conduit::TokenCache;
use conduit_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::auth::token_header;
use crate::support::{create_test_app, test_security, test_state};

fn register_body(username: &str, email: &str, password: &str) -> Value {
    json!({ "user": { "username": username, "email": email, "password": password } })
}

fn login_body(email: &str, password: &str) -> Value {
    json!({ "user": { "email": email, "password": password } })
}

#[actix_web::test]
async fn test_alice_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let cache = state.token_cache.clone();
    let app = create_test_app(state).build().await;

    // Register -> T1
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("alice", "alice@x.com", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@x.com");
    assert_eq!(body["user"]["bio"], Value::Null);
    assert_eq!(body["user"]["image"], Value::Null);
    let t1 = body["user"]["token"].as_str().unwrap().to_string();
    let claims = verify_session_token(&t1, &test_security())?;
    assert_eq!(claims.username, "alice");

    // Login with the same credentials -> same string from the cache
    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(login_body("alice@x.com", "pw123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["token"], t1.as_str());

    // Change the password
    let req = test::TestRequest::put()
        .uri("/api/user")
        .insert_header(token_header(&t1))
        .set_json(json!({ "user": { "password": "pw456" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Old password: invalid credentials, without saying which part was wrong
    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(login_body("alice@x.com", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        Some("Invalid email or password"),
    )
    .await;

    // New password -> T2, a valid token for the same identity
    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(login_body("alice@x.com", "pw456"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let t2 = body["user"]["token"].as_str().unwrap().to_string();
    let claims = verify_session_token(&t2, &test_security())?;
    assert_eq!(claims.email, "alice@x.com");
    assert_eq!(cache.get("alice@x.com", "alice").await.as_deref(), Some(t2.as_str()));

    Ok(())
}

#[actix_web::test]
async fn test_current_user_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("bob", "bob@x.com", "pw123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["user"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(token_header(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["username"], "bob");
    assert_eq!(body["user"]["token"], token.as_str());

    Ok(())
}

#[actix_web::test]
async fn test_update_profile_fields() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("carol", "carol@x.com", "pw123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["user"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri("/api/user")
        .insert_header(token_header(&token))
        .set_json(json!({ "user": {
            "email": "carol@y.com",
            "bio": "Hello",
            "image": "https://img.example/c.png"
        } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["email"], "carol@y.com");
    assert_eq!(body["user"]["bio"], "Hello");
    assert_eq!(body["user"]["image"], "https://img.example/c.png");

    // The previous token names the old email, which no longer exists.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(token_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    // The new token works.
    let new_token = body["user"]["token"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(token_header(&new_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["email"], "carol@y.com");

    Ok(())
}

#[actix_web::test]
async fn test_register_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("dave", "dave@x.com", "pw123"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("dave2", "dave@x.com", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNIQUE_EMAIL",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body("dave", "dave2@x.com", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNIQUE_USERNAME",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_register_and_login_validation() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "user": { "username": "erin", "password": "pw123" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("email"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(login_body("", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("email"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_login_unknown_email_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(login_body("nobody@x.com", "pw123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    Ok(())
}
