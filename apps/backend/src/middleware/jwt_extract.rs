//! Session token extraction middleware.
//!
//! Wraps the protected scopes. Parses `Authorization: <scheme> <token>`,
//! verifies the token and stores a fresh `AuthContext` carrying its claims in
//! this request's extensions. Any failure short-circuits with
//! `AppError::Unauthorized` and the wrapped service is never called. No cache
//! or store I/O happens here.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::{verify_session_token, AuthContext};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security as security_log;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

/// Why an Authorization header was not accepted. Logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRejection {
    Missing,
    NotUtf8,
    Malformed,
    WrongScheme,
    EmptyToken,
}

impl HeaderRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderRejection::Missing => "missing header",
            HeaderRejection::NotUtf8 => "header is not valid UTF-8",
            HeaderRejection::Malformed => "malformed header",
            HeaderRejection::WrongScheme => "wrong scheme",
            HeaderRejection::EmptyToken => "empty token",
        }
    }

    /// A missing header is an anonymous request, not a rejected credential,
    /// so it does not produce a `token_rejected` event.
    pub fn is_security_event(&self) -> bool {
        !matches!(self, HeaderRejection::Missing)
    }
}

/// Extract the token from an Authorization header value.
///
/// The value must be exactly `<scheme> <token>`: two segments separated by a
/// single space, the scheme matching `expected_scheme` ignoring ASCII case.
pub fn parse_authorization<'a>(
    value: Option<&'a HeaderValue>,
    expected_scheme: &str,
) -> Result<&'a str, HeaderRejection> {
    let raw = value
        .ok_or(HeaderRejection::Missing)?
        .to_str()
        .map_err(|_| HeaderRejection::NotUtf8)?;

    let (scheme, token) = raw.split_once(' ').ok_or(HeaderRejection::Malformed)?;
    if token.contains(' ') {
        return Err(HeaderRejection::Malformed);
    }
    if !scheme.eq_ignore_ascii_case(expected_scheme) {
        return Err(HeaderRejection::WrongScheme);
    }
    if token.is_empty() {
        return Err(HeaderRejection::EmptyToken);
    }
    Ok(token)
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let app_state = match req.app_data::<web::Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal(ErrorCode::Internal, "AppState not available").into())
                });
            }
        };

        let security = &app_state.security;
        let token = match parse_authorization(
            req.headers().get(header::AUTHORIZATION),
            &security.auth_scheme,
        ) {
            Ok(token) => token.to_string(),
            Err(reason) => {
                debug!(?reason, "authorization header rejected");
                if reason.is_security_event() {
                    security_log::token_rejected(reason.as_str());
                }
                return Box::pin(async { Err(AppError::unauthorized().into()) });
            }
        };

        match verify_session_token(&token, security) {
            Ok(claims) => {
                // Always a new context: nothing from a previous request survives.
                req.extensions_mut()
                    .insert(AuthContext::anonymous().with_claims(claims));
                Box::pin(self.service.call(req))
            }
            Err(err) => {
                security_log::token_rejected("verification failed");
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}
