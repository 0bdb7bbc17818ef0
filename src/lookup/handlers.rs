use axum::{
    Json,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::LookupError;
use super::service::LookupService;
use super::types::{AddRequest, AddResponse, DeleteResponse, HealthResponse, SuggestParams};
use crate::entries::store::EntryStore;
use crate::entries::types::{EntryPatch, WordEntry};

pub async fn handle_add<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddResponse>), LookupError> {
    let Json(req) = payload.map_err(invalid_body)?;
    let entry = service.add(req)?;
    Ok((
        StatusCode::CREATED,
        Json(AddResponse {
            message: "Word added!".to_string(),
            word: entry,
        }),
    ))
}

pub async fn handle_define<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    Path(word): Path<String>,
) -> Result<Json<WordEntry>, LookupError> {
    service.define(&word).map(Json)
}

pub async fn handle_update<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    Path(word): Path<String>,
    payload: Result<Json<EntryPatch>, JsonRejection>,
) -> Result<Json<WordEntry>, LookupError> {
    let Json(patch) = payload.map_err(invalid_body)?;
    service.update(&word, &patch).map(Json)
}

pub async fn handle_delete<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    Path(word): Path<String>,
) -> Result<Json<DeleteResponse>, LookupError> {
    let word = service.delete(&word)?;
    Ok(Json(DeleteResponse {
        message: "Word deleted".to_string(),
        word,
    }))
}

pub async fn handle_suggest<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    Json(service.suggest(params.q.as_deref().unwrap_or_default()))
}

pub async fn handle_health<S: EntryStore>(
    Extension(service): Extension<Arc<LookupService<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        entries: service.entry_count(),
    })
}

/// Malformed, wrongly typed or non-JSON bodies are caller errors like any other.
fn invalid_body(rejection: JsonRejection) -> LookupError {
    LookupError::InvalidInput(rejection.body_text())
}
