//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_core::domain::User;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

fn auth_response(state: &AppState, user: &User, message: &str) -> AppResult<AuthResponse> {
    let token = state.tokens.issue(user.id)?;

    Ok(AuthResponse {
        message: message.to_string(),
        user: user_response(user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .credentials
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(auth_response(&state, &user, "User registered successfully")?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .credentials
        .verify_credentials(&req.email, &req.password)
        .await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(auth_response(&state, &user, "Login successful")?))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    // A valid token for a user that no longer exists is still unauthenticated.
    let user = state
        .credentials
        .get_user(identity.user_id)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => AppError::Unauthorized,
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}
