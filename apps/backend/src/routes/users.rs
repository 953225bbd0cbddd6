use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::services::session::{UserSession, UserUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub user: T,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserBody,
}

impl From<UserSession> for UserResponse {
    fn from(session: UserSession) -> Self {
        Self {
            user: UserBody {
                email: session.email,
                token: session.token,
                username: session.username,
                bio: session.bio,
                image: session.image,
            },
        }
    }
}

impl From<UpdateUser> for UserUpdate {
    fn from(body: UpdateUser) -> Self {
        Self {
            email: body.email,
            username: body.username,
            password: body.password,
            bio: body.bio,
            image: body.image,
        }
    }
}

async fn register(
    body: web::Json<Envelope<RegisterUser>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterUser {
        username,
        email,
        password,
    } = body.into_inner().user;

    let session = app_state
        .sessions()
        .register(&username, &email, &password)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(session)))
}

async fn login(
    body: web::Json<Envelope<LoginUser>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginUser { email, password } = body.into_inner().user;

    let session = app_state.sessions().login(&email, &password).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(session)))
}

async fn current_user(
    ctx: AuthContext,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions().current_user(&ctx).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(session)))
}

async fn update_user(
    ctx: AuthContext,
    body: web::Json<Envelope<UpdateUser>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let update = UserUpdate::from(body.into_inner().user);

    let session = app_state.sessions().update_user(&ctx, update).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(session)))
}

/// Mounted under `/api/users`.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(register))
        .route("/login", web::post().to(login));
}

/// Mounted under `/api/user`, behind `JwtExtract`.
pub fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(current_user))
        .route("", web::put().to(update_user));
}
