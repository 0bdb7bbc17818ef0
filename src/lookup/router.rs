//! Route table for the dictionary HTTP API.

use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::*;
use super::service::LookupService;
use crate::entries::store::EntryStore;

pub const ENDPOINT_ADD: &str = "/add";
pub const ENDPOINT_DEFINE: &str = "/define";
pub const ENDPOINT_WORDS: &str = "/words";
pub const ENDPOINT_SUGGEST: &str = "/suggest";
pub const ENDPOINT_HEALTH: &str = "/health";

pub fn build_router<S: EntryStore>(service: Arc<LookupService<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ENDPOINT_ADD, post(handle_add::<S>))
        .route(&format!("{}/:word", ENDPOINT_DEFINE), get(handle_define::<S>))
        .route(
            &format!("{}/:word", ENDPOINT_WORDS),
            get(handle_define::<S>)
                .put(handle_update::<S>)
                .delete(handle_delete::<S>),
        )
        .route(ENDPOINT_SUGGEST, get(handle_suggest::<S>))
        .route(ENDPOINT_HEALTH, get(handle_health::<S>))
        .layer(Extension(service))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
