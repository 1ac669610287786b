//! Dashboard handler.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let stats = state.dashboard.get_stats(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}
