//! Multipart form shared by post creation and update.

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;

use quill_core::domain::{ImageUpload, PostChanges, PostDraft};

use crate::middleware::error::{AppError, AppResult};

/// Largest accepted text field.
const MAX_TEXT_BYTES: usize = 256 * 1024;
/// Tag names per post, counted across every `tags` part.
pub const MAX_TAGS: usize = 20;
/// Parts per form, known or not.
const MAX_PARTS: usize = 64;

/// Typed view of a post form. Absent fields stay `None`.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub intro: Option<String>,
    pub description: Option<String>,
    pub conclusion: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<ImageUpload>,
}

impl PostForm {
    /// Read every part of the payload. `tags` and `tags[]` may repeat and may
    /// hold comma-separated names.
    pub async fn read(mut payload: Multipart, max_image_bytes: usize) -> AppResult<Self> {
        let mut form = PostForm::default();
        let mut parts = 0;

        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            parts += 1;
            if parts > MAX_PARTS {
                return Err(AppError::bad_request(format!(
                    "Form has more than {MAX_PARTS} parts"
                )));
            }

            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(&mut field, "title").await?),
                "intro" => form.intro = Some(read_text(&mut field, "intro").await?),
                "description" => {
                    form.description = Some(read_text(&mut field, "description").await?)
                }
                "conclusion" => form.conclusion = Some(read_text(&mut field, "conclusion").await?),
                "tags" | "tags[]" => {
                    let value = read_text(&mut field, "tags").await?;
                    form.push_tags(&value)?;
                }
                "image" => form.image = read_image(&mut field, max_image_bytes).await?,
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn push_tags(&mut self, value: &str) -> AppResult<()> {
        let tags = self.tags.get_or_insert_with(Vec::new);
        tags.extend(split_tags(value));

        if tags.len() > MAX_TAGS {
            return Err(AppError::invalid_field(
                "tags",
                format!("At most {MAX_TAGS} tags per post"),
            ));
        }
        Ok(())
    }

    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_default(),
            intro: self.intro.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            conclusion: self.conclusion.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            image: self.image,
        }
    }

    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title,
            intro: self.intro,
            description: self.description,
            conclusion: self.conclusion,
            tags: self.tags,
            image: self.image,
        }
    }
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    AppError::bad_request(format!("Malformed multipart body: {err}"))
}

/// Split one tags value on commas, dropping blanks.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

async fn read_bytes(field: &mut Field, limit: usize, name: &'static str) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::invalid_field(
                name,
                format!("{name} must be at most {limit} bytes"),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field, name: &'static str) -> AppResult<String> {
    let bytes = read_bytes(field, MAX_TEXT_BYTES, name).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::invalid_field(name, format!("{name} must be valid UTF-8")))
}

/// An empty file part (no file chosen in a browser form) counts as absent.
async fn read_image(field: &mut Field, max_bytes: usize) -> AppResult<Option<ImageUpload>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = read_bytes(field, max_bytes, "image").await?;
    if bytes.is_empty() && file_name.is_none() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes,
    }))
}
