//! HTTP API for the contact directory.

use crate::application_service::contact_service::ContactService;
use crate::domain::contact::{Contact, ContactInput};
use crate::port::contact_repository::ContactRepository;
use crate::presentation::access_log::access_log;
use crate::presentation::error::{ApiError, UnknownEndpoint};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Application state shared across handlers.
pub type AppState<R> = Arc<ContactService<R>>;

/// Create the API router.
///
/// The contact resource is served at `/persons` and, for front-ends built
/// against the `/api` prefix, at `/api/persons` as well.
pub fn create_router<R: ContactRepository + 'static>(state: AppState<R>) -> Router {
    let persons = Router::new()
        .route("/persons", get(list_persons::<R>).post(create_person::<R>))
        .route(
            "/persons/{id}",
            get(get_person::<R>)
                .put(update_person::<R>)
                .delete(delete_person::<R>),
        );

    Router::new()
        .route("/health", get(health_check::<R>))
        .route("/info", get(info::<R>))
        .merge(persons.clone())
        .nest("/api", persons)
        .method_not_allowed_fallback(unknown_endpoint)
        .with_state(state)
}

/// Create the full application: API routes, static front-end, and layers.
///
/// Anything no route or static file answers gets the unknown-endpoint 404.
pub fn build_app<R: ContactRepository + 'static>(
    state: AppState<R>,
    static_dir: Option<&FsPath>,
) -> Router {
    let router = create_router(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(unknown_endpoint.into_service()),
        ),
        None => router.fallback(unknown_endpoint),
    };

    router
        .layer(middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub contacts: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
async fn health_check<R: ContactRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let contacts = state.count().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        contacts,
    }))
}

/// Phonebook summary page.
async fn info<R: ContactRepository>(
    State(state): State<AppState<R>>,
) -> Result<Html<String>, ApiError> {
    let count = state.count().await?;
    let now = Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
    Ok(Html(format!(
        "<p>Phonebook has info for {count} people.</p><p>{now}</p>"
    )))
}

/// List all contacts.
async fn list_persons<R: ContactRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.list().await?))
}

/// Get one contact.
async fn get_person<R: ContactRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.get(&id).await?))
}

/// Create a contact.
async fn create_person<R: ContactRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.create(input).await?))
}

/// Replace a contact's name and number.
async fn update_person<R: ContactRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.update(&id, input).await?))
}

/// Delete a contact.
async fn delete_person<R: ContactRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unknown_endpoint() -> UnknownEndpoint {
    UnknownEndpoint::default()
}
