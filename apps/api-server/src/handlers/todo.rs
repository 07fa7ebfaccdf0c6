//! Todo endpoints, gated on manager access tokens.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use guestbook_core::domain::{TodoFilter, TodoLookup, TodoPatch};
use guestbook_shared::Envelope;
use guestbook_shared::dto::CreateTodoRequest;

use crate::middleware::auth::ManagerIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::observability::trace::TraceId;
use crate::state::AppState;

pub async fn create(
    state: web::Data<AppState>,
    identity: ManagerIdentity,
    trace: TraceId,
    body: web::Json<CreateTodoRequest>,
) -> AppResult<HttpResponse> {
    let todo = state
        .todo
        .create(identity.0.id, body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), todo)))
}

pub async fn get_one(
    state: web::Data<AppState>,
    _identity: ManagerIdentity,
    trace: TraceId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let todo = state
        .todo
        .get(path.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), todo)))
}

#[derive(Debug, Deserialize)]
pub struct FindTodoQuery {
    key: Option<String>,
    code: Option<String>,
}

pub async fn find_one(
    state: web::Data<AppState>,
    _identity: ManagerIdentity,
    trace: TraceId,
    query: web::Query<FindTodoQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let lookup = query
        .key
        .map(TodoLookup::Key)
        .or(query.code.map(TodoLookup::Code))
        .ok_or_else(|| {
            AppError::missing_fields("key or code is required").with_trace(trace.as_str())
        })?;

    let todo = state
        .todo
        .find_one(lookup)
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), todo)))
}

pub async fn get_list(
    state: web::Data<AppState>,
    _identity: ManagerIdentity,
    trace: TraceId,
    body: web::Json<TodoFilter>,
) -> AppResult<HttpResponse> {
    let page = state
        .todo
        .list(body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), page)))
}

pub async fn update(
    state: web::Data<AppState>,
    identity: ManagerIdentity,
    trace: TraceId,
    path: web::Path<Uuid>,
    body: web::Json<TodoPatch>,
) -> AppResult<HttpResponse> {
    let todo = state
        .todo
        .update(path.into_inner(), identity.0.id, body.into_inner())
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), todo)))
}

pub async fn delete(
    state: web::Data<AppState>,
    _identity: ManagerIdentity,
    trace: TraceId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state
        .todo
        .delete(id)
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), serde_json::json!({ "id": id }))))
}

pub async fn hard_delete(
    state: web::Data<AppState>,
    _identity: ManagerIdentity,
    trace: TraceId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state
        .todo
        .hard_delete(id)
        .await
        .map_err(|e| e.with_trace(trace.as_str()))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(trace.as_str(), serde_json::json!({ "id": id }))))
}
