use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::services::profiles::Profile;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileBody,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            profile: ProfileBody {
                username: profile.username,
                bio: profile.bio,
                image: profile.image,
                following: profile.following,
            },
        }
    }
}

async fn get_profile(
    ctx: AuthContext,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = app_state.profiles().get_profile(&ctx, &path).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

async fn follow(
    ctx: AuthContext,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = app_state.profiles().follow(&ctx, &path).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

async fn unfollow(
    ctx: AuthContext,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = app_state.profiles().unfollow(&ctx, &path).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{username}", web::get().to(get_profile))
        .route("/{username}/follow", web::post().to(follow))
        .route("/{username}/follow", web::delete().to(unfollow));
}
