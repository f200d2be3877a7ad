//! REST endpoints for the onboarding wizard and the latest saved profile.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use super::manager::{WizardHandle, WizardManager};
use crate::error::{SessionError, WizardError};
use crate::extract::ApiJson;
use crate::profile::{BasicInfo, ChoiceField, TagField, TagId};

/// Where the client goes after a successful submit.
const DASHBOARD_PATH: &str = "/dashboard";

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<WizardManager>,
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/sessions", post(create_session))
        .route(
            "/api/onboarding/sessions/{id}",
            get(get_session).delete(discard_session),
        )
        .route("/api/onboarding/sessions/{id}/basic-info", put(set_basic_info))
        .route("/api/onboarding/sessions/{id}/tags", post(add_tag))
        .route(
            "/api/onboarding/sessions/{id}/tags/{field}/{tag_id}",
            delete(remove_tag),
        )
        .route("/api/onboarding/sessions/{id}/toggle", post(toggle_choice))
        .route("/api/onboarding/sessions/{id}/advance", post(advance))
        .route("/api/onboarding/sessions/{id}/retreat", post(retreat))
        .route("/api/onboarding/sessions/{id}/submit", post(submit))
        .route("/api/profiles/latest", get(latest_profile))
        .with_state(state)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"error": message.into()}))).into_response()
}

fn wizard_error_response(err: WizardError) -> Response {
    match err {
        WizardError::Incomplete(v) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": v.to_string(),
                "step": v.step,
                "issues": v.issues,
            })),
        )
            .into_response(),
        WizardError::InvalidChoice(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        e @ (WizardError::NotAtReview { .. }
        | WizardError::NoPreviousStep
        | WizardError::AlreadySubmitted) => error_response(StatusCode::CONFLICT, e.to_string()),
        e @ WizardError::Store(_) => error_response(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

/// Resolve a path id to a live session.
async fn session(state: &OnboardingRouteState, id: &str) -> Result<(Uuid, WizardHandle), Response> {
    let session_id = Uuid::parse_str(id)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid session ID"))?;
    let handle = state
        .manager
        .get(session_id)
        .await
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Session not found"))?;
    Ok((session_id, handle))
}

fn view_json(session_id: Uuid, view: super::wizard::WizardView) -> serde_json::Value {
    json!({"session_id": session_id, "wizard": view})
}

// ── Sessions ────────────────────────────────────────────────────────────

async fn create_session(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let (id, handle) = state.manager.create().await;
    let view = handle.lock().await.view();
    (StatusCode::CREATED, Json(view_json(id, view)))
}

async fn get_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
) -> Response {
    match session(&state, &id).await {
        Ok((id, handle)) => {
            let view = handle.lock().await.view();
            Json(view_json(id, view)).into_response()
        }
        Err(resp) => resp,
    }
}

async fn discard_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(session_id) = Uuid::parse_str(&id) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid session ID");
    };
    if state.manager.discard(session_id).await {
        Json(json!({"status": "discarded"})).into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "Session not found")
    }
}

// ── Draft edits ─────────────────────────────────────────────────────────

async fn set_basic_info(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
    ApiJson(info): ApiJson<BasicInfo>,
) -> Response {
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.set_basic_info(info) {
        Ok(()) => Json(view_json(id, wizard.view())).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

#[derive(Deserialize)]
struct TagRequest {
    field: TagField,
    value: String,
}

async fn add_tag(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<TagRequest>,
) -> Response {
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.add_tag(body.field, &body.value) {
        Ok(Some(tag_id)) => (
            StatusCode::CREATED,
            Json(json!({"tag_id": tag_id, "session_id": id, "wizard": wizard.view()})),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::BAD_REQUEST, "Tag value must not be blank"),
        Err(e) => wizard_error_response(e),
    }
}

async fn remove_tag(
    State(state): State<OnboardingRouteState>,
    Path((id, field, tag_id)): Path<(String, String, String)>,
) -> Response {
    let field = match TagField::from_str(&field) {
        Ok(f) => f,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
    };
    let Ok(tag_id) = TagId::from_str(&tag_id) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid tag ID");
    };
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.remove_tag(field, tag_id) {
        Ok(true) => Json(view_json(id, wizard.view())).into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Tag not found"),
        Err(e) => wizard_error_response(e),
    }
}

#[derive(Deserialize)]
struct ToggleRequest {
    field: ChoiceField,
    value: String,
}

async fn toggle_choice(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ToggleRequest>,
) -> Response {
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.toggle_choice(body.field, &body.value) {
        Ok(selected) => Json(json!({
            "selected": selected,
            "session_id": id,
            "wizard": wizard.view(),
        }))
        .into_response(),
        Err(e) => wizard_error_response(e),
    }
}

// ── Navigation ──────────────────────────────────────────────────────────

async fn advance(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.advance() {
        Ok(_) => Json(view_json(id, wizard.view())).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

async fn retreat(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    let (id, handle) = match session(&state, &id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut wizard = handle.lock().await;
    match wizard.retreat() {
        Ok(_) => Json(view_json(id, wizard.view())).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

async fn submit(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    let Ok(session_id) = Uuid::parse_str(&id) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid session ID");
    };
    match state.manager.submit(session_id).await {
        Ok(profile) => (
            StatusCode::CREATED,
            Json(json!({"profile": profile, "redirect": DASHBOARD_PATH})),
        )
            .into_response(),
        Err(SessionError::NotFound(_)) => error_response(StatusCode::NOT_FOUND, "Session not found"),
        Err(SessionError::Wizard(e)) => wizard_error_response(e),
    }
}

// ── Profiles ────────────────────────────────────────────────────────────

async fn latest_profile(State(state): State<OnboardingRouteState>) -> Response {
    match state.manager.store().fetch_latest().await {
        Ok(profile) => Json(json!({"profile": profile})).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load latest profile");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
