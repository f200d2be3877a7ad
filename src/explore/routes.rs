//! REST endpoints for browsing students and editing your own profile.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::directory::StudentDirectory;
use super::filter::FilterSelection;
use crate::extract::ApiJson;
use crate::profile::ProfileDraft;

/// Shared state for explore routes.
#[derive(Clone)]
pub struct ExploreRouteState {
    pub directory: Arc<StudentDirectory>,
}

/// Build the explore and profile REST routes.
pub fn explore_routes(state: ExploreRouteState) -> Router {
    Router::new()
        .route("/api/students", get(list_students))
        .route("/api/students/search", post(search_students))
        .route("/api/students/filters", get(filter_options))
        .route("/api/students/{id}", get(get_student))
        .route("/api/students/{id}/contact", post(contact_student))
        .route("/api/me", get(get_me).put(update_me))
        .with_state(state)
}

fn student_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Student not found"})),
    )
        .into_response()
}

async fn list_students(State(state): State<ExploreRouteState>) -> impl IntoResponse {
    let students = state.directory.snapshot().await;
    Json(students.as_ref().clone())
}

/// POST /api/students/search
///
/// Body is a `FilterSelection`; missing fields impose no constraint.
async fn search_students(
    State(state): State<ExploreRouteState>,
    ApiJson(selection): ApiJson<FilterSelection>,
) -> impl IntoResponse {
    let students = state.directory.search(&selection).await;
    Json(json!({"count": students.len(), "students": students}))
}

async fn filter_options(State(state): State<ExploreRouteState>) -> impl IntoResponse {
    Json(state.directory.filter_options().await)
}

async fn get_student(State(state): State<ExploreRouteState>, Path(id): Path<String>) -> Response {
    match state.directory.get(&id).await {
        Some(student) => Json(student).into_response(),
        None => student_not_found(),
    }
}

async fn contact_student(
    State(state): State<ExploreRouteState>,
    Path(id): Path<String>,
) -> Response {
    match state.directory.contact(&id).await {
        Some(receipt) => Json(receipt).into_response(),
        None => student_not_found(),
    }
}

async fn get_me(State(state): State<ExploreRouteState>) -> impl IntoResponse {
    Json(state.directory.current_user().await)
}

/// PUT /api/me
///
/// Takes a whole `ProfileDraft`, checks every step and saves it.
async fn update_me(
    State(state): State<ExploreRouteState>,
    ApiJson(draft): ApiJson<ProfileDraft>,
) -> Response {
    match state.directory.update_current_user(draft).await {
        Ok(profile) => Json(profile).into_response(),
        Err(v) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": v.to_string(),
                "step": v.step,
                "issues": v.issues,
            })),
        )
            .into_response(),
    }
}
