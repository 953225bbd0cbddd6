use actix_web::{web, App, HttpServer};
use conduit::config::Config;
use conduit::infra::state::build_state;
use conduit::middleware::cors::cors_middleware;
use conduit::middleware::request_trace::RequestTrace;
use conduit::routes;
use conduit::state::security_config::SecurityConfig;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or sourced manually for local dev).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let security_config = SecurityConfig::new(config.jwt_secret.as_bytes())
        .with_auth_scheme(config.auth_scheme.clone());

    let app_state = match build_state()
        .with_db(config.database_url.clone())
        .with_redis(config.redis_url.clone())
        .with_token_ttl_secs(config.token_cache_ttl_secs)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting conduit backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
