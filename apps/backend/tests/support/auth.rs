use actix_web::http::header;
use conduit::auth::mint_session_token;
use conduit::state::security_config::SecurityConfig;

pub fn mint_test_token(username: &str, email: &str, security: &SecurityConfig) -> String {
    mint_session_token(username, email, security).expect("signing with a byte secret succeeds")
}

/// `Authorization: Token <jwt>`
pub fn token_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Token {token}"))
}
