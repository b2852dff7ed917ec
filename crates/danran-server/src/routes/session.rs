//! Session Routes - Family conversation lifecycle
//!
//! HTTP handlers that delegate to SessionService for business logic. The
//! endpoints map 1:1 onto the orchestrator operations: start, message,
//! profile, end, plus roster mutation and moment listing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use danran::domain::{DomainError, FamilyRole};

use crate::models::{
    AddMemberRequest, EndSessionResponse, MessageRequest, MessageResponse, MomentResponse,
    PersonaResponse, ProfileResponse, RemoveMemberResponse, SceneDetail, SceneResponse,
    StartSessionRequest, StartSessionResponse, TurnResponse,
};
use crate::AppState;

type ApiError = (StatusCode, String);

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session/start", post(start_session))
        .route("/session/message", post(send_message))
        .route("/session/:id/profile", get(get_profile))
        .route("/session/:id/members", get(list_members))
        .route("/session/:id/member", post(add_member))
        .route("/session/:id/member/:name", delete(remove_member))
        .route("/session/:id/moments", get(list_moments))
        .route("/session/:id/scene", get(get_scene))
        .route("/session/:id/end", post(end_session))
}

/// Map domain errors onto HTTP status codes
fn into_api_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::InvalidRole(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::SessionNotActive(_) | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::GenerationUnavailable(_)
        | DomainError::MalformedExtraction(_)
        | DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Start a session
#[utoipa::path(
    post,
    path = "/session/start",
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session started with configured roster", body = StartSessionResponse),
        (status = 409, description = "Roster conflict (duplicate persona name)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Session"
)]
pub async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    let greetings = state
        .session_service
        .start(&payload.session_id, payload.profile)
        .await
        .map_err(into_api_error)?;

    let members = state
        .session_service
        .roster(&payload.session_id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(StartSessionResponse {
        session_id: payload.session_id,
        status: "started".to_string(),
        members: members.iter().map(PersonaResponse::from).collect(),
        greetings: greetings.iter().map(TurnResponse::from).collect(),
    }))
}

/// Send a message to the family
#[utoipa::path(
    post,
    path = "/session/message",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Persona responses in priority order", body = MessageResponse),
        (status = 409, description = "Session not active"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Session"
)]
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let turns = state
        .session_service
        .process_message(&payload.session_id, &payload.message)
        .await
        .map_err(into_api_error)?;

    let member_emotions = state
        .session_service
        .roster(&payload.session_id)
        .await
        .map_err(into_api_error)?
        .iter()
        .map(|p| (p.name.clone(), p.current_emotion.to_string()))
        .collect();

    Ok(Json(MessageResponse {
        session_id: payload.session_id,
        responses: turns.iter().map(TurnResponse::from).collect(),
        member_emotions,
    }))
}

/// Get the profile for a session
#[utoipa::path(
    get,
    path = "/session/{id}/profile",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Profile for the session", body = ProfileResponse),
        (status = 409, description = "Unknown session")
    ),
    tag = "Session"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .session_service
        .profile(&id)
        .await
        .map_err(into_api_error)?;
    Ok(Json(ProfileResponse {
        session_id: id,
        profile,
    }))
}

/// List active family members
#[utoipa::path(
    get,
    path = "/session/{id}/members",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Active roster", body = Vec<PersonaResponse>),
        (status = 409, description = "Session not active")
    ),
    tag = "Roster"
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PersonaResponse>>, ApiError> {
    let members = state
        .session_service
        .roster(&id)
        .await
        .map_err(into_api_error)?;
    Ok(Json(members.iter().map(PersonaResponse::from).collect()))
}

/// Add a family member
#[utoipa::path(
    post,
    path = "/session/{id}/member",
    params(("id" = String, Path, description = "Session ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = PersonaResponse),
        (status = 400, description = "Unknown role tag"),
        (status = 409, description = "Session not active or duplicate name")
    ),
    tag = "Roster"
)]
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<PersonaResponse>, ApiError> {
    let role: FamilyRole = payload.role.parse().map_err(into_api_error)?;
    let overrides = payload.overrides.unwrap_or_default();

    let persona = state
        .session_service
        .add_member(&id, role, &overrides)
        .await
        .map_err(into_api_error)?;
    Ok(Json(PersonaResponse::from(&persona)))
}

/// Remove a family member by name
#[utoipa::path(
    delete,
    path = "/session/{id}/member/{name}",
    params(
        ("id" = String, Path, description = "Session ID"),
        ("name" = String, Path, description = "Persona name")
    ),
    responses(
        (status = 200, description = "Removal outcome", body = RemoveMemberResponse),
        (status = 409, description = "Session not active")
    ),
    tag = "Roster"
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<RemoveMemberResponse>, ApiError> {
    let removed = state
        .session_service
        .remove_member(&id, &name)
        .await
        .map_err(into_api_error)?;
    Ok(Json(RemoveMemberResponse { removed }))
}

/// List extracted happy moments
#[utoipa::path(
    get,
    path = "/session/{id}/moments",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Happy moments so far", body = Vec<MomentResponse>),
        (status = 409, description = "Session not active")
    ),
    tag = "Moments"
)]
pub async fn list_moments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MomentResponse>>, ApiError> {
    let moments = state
        .session_service
        .moments(&id)
        .await
        .map_err(into_api_error)?;
    Ok(Json(moments.iter().map(MomentResponse::from).collect()))
}

/// Render the latest happy moment as a family scene
#[utoipa::path(
    get,
    path = "/session/{id}/scene",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Scene for the latest moment, null when none", body = SceneResponse),
        (status = 409, description = "Session not active")
    ),
    tag = "Moments"
)]
pub async fn get_scene(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SceneResponse>, ApiError> {
    let scene = state
        .session_service
        .scene(&id)
        .await
        .map_err(into_api_error)?;
    Ok(Json(SceneResponse {
        session_id: id,
        scene: scene.as_ref().map(SceneDetail::from),
    }))
}

/// End a session
#[utoipa::path(
    post,
    path = "/session/{id}/end",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session ended", body = EndSessionResponse),
        (status = 409, description = "Session not active")
    ),
    tag = "Session"
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EndSessionResponse>, ApiError> {
    state
        .session_service
        .end(&id)
        .await
        .map_err(into_api_error)?;
    Ok(Json(EndSessionResponse {
        session_id: id,
        status: "ended".to_string(),
    }))
}
