/// User registration and login API routes
use crate::{
    error::MessageError,
    services::{Credentials, RegisterUser},
    state::AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default, alias = "userName")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "userName")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            password2: req.password2,
        }
    }
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}

/// POST /api/user/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, MessageError> {
    let Json(req) = payload?;

    let message = app_state.credentials.register_user(req.into()).await?;

    Ok(Json(MessageResponse { message }))
}

/// POST /api/user/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, MessageError> {
    let Json(req) = payload?;

    let user = app_state.credentials.check_user(req.into()).await?;
    let token = app_state.tokens.issue_token(&user)?;
    tracing::info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        token,
    }))
}
