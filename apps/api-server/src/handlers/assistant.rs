//! Writing assistant handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Section;
use quill_shared::dto::{ChatRequest, CompletionResponse, GenerateSectionRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/ai/generate
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateSectionRequest>,
) -> AppResult<HttpResponse> {
    let section: Section = body.section.parse()?;
    let content = state.assistant.draft_section(&body.title, section).await?;
    Ok(HttpResponse::Ok().json(CompletionResponse { content }))
}

/// POST /api/ai/chat
pub async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> AppResult<HttpResponse> {
    let content = state.assistant.answer(&body.message).await?;
    Ok(HttpResponse::Ok().json(CompletionResponse { content }))
}
