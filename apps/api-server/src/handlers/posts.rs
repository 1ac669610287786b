//! Post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Page;
use quill_shared::MutationResponse;
use quill_shared::dto::PostListQuery;

use super::post_form::PostForm;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?limit&skip
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::new(query.limit, query.skip);
    let posts = state.content.list_posts(page).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts (multipart)
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload, state.max_image_bytes).await?;
    let post = state
        .content
        .create_post(form.into_draft(), identity.user_id)
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/user
pub async fn by_user(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.content.posts_by_author(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.content.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id} (multipart, partial)
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload, state.max_image_bytes).await?;
    let post = state
        .content
        .update_post(path.into_inner(), form.into_changes(), identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(MutationResponse::ok("Post updated successfully", post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .delete_post(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(MutationResponse::ok("Post deleted successfully", post)))
}
