use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::jwt_extract::JwtExtract;

pub mod health;
pub mod profiles;
pub mod users;

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
}

/// Register every route. Protected scopes are wrapped in `JwtExtract` here
/// so that the binary and the tests share one wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Registration and login: /api/users/**
    cfg.service(web::scope("/api/users").configure(users::configure_public_routes));

    // Current user: /api/user
    cfg.service(
        web::scope("/api/user")
            .wrap(JwtExtract)
            .configure(users::configure_protected_routes),
    );

    // Profiles: /api/profiles/**
    cfg.service(
        web::scope("/api/profiles")
            .wrap(JwtExtract)
            .configure(profiles::configure_routes),
    );
}
