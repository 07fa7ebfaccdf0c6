//! Guestbook endpoints. Anyone can sign; uploads and listings require
//! an admin access token.

use actix_multipart::form::{MultipartForm, bytes::Bytes as UploadedBytes};
use actix_web::{HttpResponse, web};

use guestbook_core::domain::{CommentFilter, GuestUserFilter, MediaFilter, MediaKind, WishFilter};
use guestbook_shared::Envelope;
use guestbook_shared::dto::{CommentRequest, UploadedMedia, WishRequest};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::observability::trace::TraceId;
use crate::state::AppState;

pub async fn comment(
    state: web::Data<AppState>,
    trace: TraceId,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .wedding
        .comment(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), comment)))
}

pub async fn wish(
    state: web::Data<AppState>,
    trace: TraceId,
    body: web::Json<WishRequest>,
) -> AppResult<HttpResponse> {
    let wish = state
        .wedding
        .wish(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), wish)))
}

#[derive(MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(limit = "10MB")]
    image: UploadedBytes,
}

pub async fn upload_image(
    state: web::Data<AppState>,
    identity: AdminIdentity,
    trace: TraceId,
    form: MultipartForm<ImageUploadForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let file_name = form
        .image
        .file_name
        .clone()
        .ok_or_else(|| AppError::validation("image file name is required").with_trace(trace.as_str()))?;

    let media = state
        .wedding
        .upload(
            identity.0.id,
            MediaKind::Image,
            &file_name,
            form.image.data.to_vec(),
        )
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;

    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), UploadedMedia { url: media.url })))
}

#[derive(MultipartForm)]
pub struct VideoUploadForm {
    #[multipart(limit = "200MB")]
    video: UploadedBytes,
}

pub async fn upload_video(
    state: web::Data<AppState>,
    identity: AdminIdentity,
    trace: TraceId,
    form: MultipartForm<VideoUploadForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let file_name = form
        .video
        .file_name
        .clone()
        .ok_or_else(|| AppError::validation("video file name is required").with_trace(trace.as_str()))?;

    let media = state
        .wedding
        .upload(
            identity.0.id,
            MediaKind::Video,
            &file_name,
            form.video.data.to_vec(),
        )
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;

    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), UploadedMedia { url: media.url })))
}

pub async fn get_comments(
    state: web::Data<AppState>,
    _identity: AdminIdentity,
    trace: TraceId,
    body: web::Json<CommentFilter>,
) -> AppResult<HttpResponse> {
    let page = state
        .wedding
        .comments(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), page)))
}

pub async fn get_wishes(
    state: web::Data<AppState>,
    _identity: AdminIdentity,
    trace: TraceId,
    body: web::Json<WishFilter>,
) -> AppResult<HttpResponse> {
    let page = state
        .wedding
        .wishes(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), page)))
}

pub async fn get_users(
    state: web::Data<AppState>,
    _identity: AdminIdentity,
    trace: TraceId,
    body: web::Json<GuestUserFilter>,
) -> AppResult<HttpResponse> {
    let page = state
        .wedding
        .guests(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), page)))
}

pub async fn get_media(
    state: web::Data<AppState>,
    _identity: AdminIdentity,
    trace: TraceId,
    body: web::Json<MediaFilter>,
) -> AppResult<HttpResponse> {
    let page = state
        .wedding
        .media(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), page)))
}
