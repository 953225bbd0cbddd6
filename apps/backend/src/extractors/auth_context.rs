use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::AuthContext;
use crate::error::AppError;

/// Reads the context `JwtExtract` stored for this request. Outside the
/// protected scopes this yields an anonymous context; handlers that need the
/// caller's identity go through `AuthContext::require_claims`.
impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(ctx))
    }
}
