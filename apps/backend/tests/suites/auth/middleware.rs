use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, HttpResponse};
use conduit::auth::AuthContext;
use conduit::error::AppError;
use conduit::middleware::jwt_extract::JwtExtract;
use conduit::state::security_config::SecurityConfig;
use conduit_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::auth::{mint_test_token, token_header};
use crate::support::{create_test_app, test_security, test_state};

#[derive(Clone, Default)]
struct HandlerHits(Arc<AtomicUsize>);

impl HandlerHits {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn whoami(ctx: AuthContext, hits: web::Data<HandlerHits>) -> Result<HttpResponse, AppError> {
    hits.0.fetch_add(1, Ordering::SeqCst);
    let claims = ctx.require_claims()?;
    Ok(HttpResponse::Ok().json(json!({
        "username": claims.username,
        "email": claims.email,
    })))
}

fn protected_routes(hits: HandlerHits) -> impl Fn(&mut web::ServiceConfig) + Send + Sync + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(hits.clone()));
        cfg.service(
            web::scope("/test-auth")
                .wrap(JwtExtract)
                .route("/me", web::get().to(whoami)),
        );
        cfg.route("/open/me", web::get().to(whoami));
    }
}

#[actix_web::test]
async fn test_valid_token_reaches_handler_with_claims() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let app = create_test_app(test_state().await?)
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let token = mint_test_token("alice", "alice@x.com", &test_security());
    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(token_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(hits.count(), 1);

    Ok(())
}

#[actix_web::test]
async fn test_scheme_prefix_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let app = create_test_app(test_state().await?)
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let token = mint_test_token("alice", "alice@x.com", &test_security());
    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header((header::AUTHORIZATION, format!("TOKEN {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(hits.count(), 1);

    Ok(())
}

#[actix_web::test]
async fn test_rejected_headers_never_reach_handler() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let app = create_test_app(test_state().await?)
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let foreign = mint_test_token(
        "alice",
        "alice@x.com",
        &SecurityConfig::new("some-other-secret".as_bytes()),
    );
    let cases: Vec<Option<String>> = vec![
        None,
        Some("Bearer abc".to_string()),
        Some("Token".to_string()),
        Some("Token ".to_string()),
        Some("Token abc.def.ghi".to_string()),
        Some(format!("Token {foreign}")),
    ];

    for case in cases {
        let mut req = test::TestRequest::get().uri("/test-auth/me");
        if let Some(value) = &case {
            req = req.insert_header((header::AUTHORIZATION, value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        let problem = assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED",
            StatusCode::UNAUTHORIZED,
            Some("Authentication required"),
        )
        .await;
        assert_ne!(problem.trace_id, "unknown", "case {case:?}");
    }

    assert_eq!(hits.count(), 0);
    Ok(())
}

#[actix_web::test]
async fn test_context_does_not_leak_between_requests() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let app = create_test_app(test_state().await?)
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let token = mint_test_token("alice", "alice@x.com", &test_security());
    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(token_header(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // An unprotected route sees no identity even right after a verified request.
    let req = test::TestRequest::get().uri("/open/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    assert_eq!(hits.count(), 2);
    Ok(())
}

#[actix_web::test]
async fn test_custom_scheme_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let mut state = test_state().await?;
    state.security = test_security().with_auth_scheme("Bearer");
    let app = create_test_app(state)
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let token = mint_test_token("alice", "alice@x.com", &test_security());
    let bearer = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, bearer).await.status(), StatusCode::OK);

    let token_scheme = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(token_header(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, token_scheme).await.status(),
        StatusCode::UNAUTHORIZED
    );

    assert_eq!(hits.count(), 1);
    Ok(())
}

#[actix_web::test]
async fn test_missing_app_state_is_internal_error() -> Result<(), Box<dyn std::error::Error>> {
    let hits = HandlerHits::default();
    let app = create_test_app(test_state().await?)
        .without_state()
        .with_routes(protected_routes(hits.clone()))
        .build()
        .await;

    let token = mint_test_token("alice", "alice@x.com", &test_security());
    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(token_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INTERNAL",
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("Internal server error"),
    )
    .await;
    assert_eq!(hits.count(), 0);
    Ok(())
}
