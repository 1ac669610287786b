//! Tag handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::CreateTagRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.content.list_tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}

/// POST /api/tags - 201 when the tag was created, 200 when it already existed.
pub async fn ensure(
    state: web::Data<AppState>,
    body: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    let ensured = state.content.ensure_tag(&body.name).await?;
    let mut response = if ensured.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(ensured.tag))
}
