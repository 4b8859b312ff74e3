use std::path::Path as FsPath;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::{
    db::bootcamp::{get_bootcamp, set_bootcamp_media},
    errors::AppError,
    http::handlers::parse_id,
    models::{DataResponse, bootcamp::MediaKind},
    state::AppState,
};

pub async fn bootcamp_photo_upload_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DataResponse<String>>, AppError> {
    upload_media(MediaKind::Photo, &id, state, headers, body).await
}

pub async fn bootcamp_video_upload_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DataResponse<String>>, AppError> {
    upload_media(MediaKind::Video, &id, state, headers, body).await
}

async fn upload_media(
    kind: MediaKind,
    raw_id: &str,
    state: AppState,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DataResponse<String>>, AppError> {
    let id = parse_id(raw_id)?;

    // Existence first: a missing bootcamp is a 404 even with a bad upload.
    get_bootcamp(id, state.redis.clone()).await?;

    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let max_bytes = match kind {
        MediaKind::Photo => state.config.max_photo_upload,
        MediaKind::Video => state.config.max_video_upload,
    };

    let ext = check_media(kind, content_type, body.len() as u64, max_bytes)?;

    let filename = media_filename(kind, id, ext);
    let dir = match kind {
        MediaKind::Photo => &state.config.photo_upload_path,
        MediaKind::Video => &state.config.video_upload_path,
    };

    // The record is only updated after the file is durably on disk.
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(FsPath::new(dir).join(&filename), &body).await?;

    set_bootcamp_media(id, kind, filename.clone(), state.redis.clone()).await?;

    tracing::info!("Stored {} for bootcamp {}", filename, id);
    Ok(Json(DataResponse::new(filename)))
}

/// Vets an upload before any byte touches disk: body attached, MIME class
/// matching the slot, size under the configured ceiling. Returns the file
/// extension to store under.
fn check_media(
    kind: MediaKind,
    content_type: &str,
    len: u64,
    max_bytes: u64,
) -> Result<&'static str, AppError> {
    let noun = match kind {
        MediaKind::Photo => "an image",
        MediaKind::Video => "a video",
    };

    if len == 0 {
        return Err(AppError::Upload("Please upload a file".into()));
    }

    if !content_type.starts_with(kind.mime_class()) {
        return Err(AppError::Upload(format!("Please upload {noun} file")));
    }

    if len > max_bytes {
        return Err(AppError::Upload(format!(
            "Please upload {noun} smaller than {max_bytes} bytes"
        )));
    }

    extension_for(content_type)
        .ok_or_else(|| AppError::Upload(format!("Unsupported media type '{content_type}'")))
}

/// Deterministic media filename: `photo_<id>.<ext>` / `video_<id>.<ext>`.
fn media_filename(kind: MediaKind, id: uuid::Uuid, ext: &str) -> String {
    format!("{}_{}.{}", kind.prefix(), id, ext)
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        "video/quicktime" => Some("mov"),
        "video/mpeg" => Some("mpg"),
        _ => None,
    }
}
