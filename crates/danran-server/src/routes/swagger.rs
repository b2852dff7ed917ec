//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AddMemberRequest, EndSessionResponse, MessageRequest, MessageResponse, MomentResponse,
    PersonaResponse, ProfileResponse, RemoveMemberResponse, SceneDetail, SceneResponse,
    StartSessionRequest, StartSessionResponse, TurnResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::session::start_session,
        super::session::send_message,
        super::session::get_profile,
        super::session::list_members,
        super::session::add_member,
        super::session::remove_member,
        super::session::list_moments,
        super::session::get_scene,
        super::session::end_session,
    ),
    info(
        title = "Danran API",
        version = "0.1.0",
        description = "団欒 (Danran) - Role-based family conversation orchestrator\n\nSchedules family personas over a shared conversation log and extracts happy moments.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Session", description = "Session lifecycle and message processing"),
        (name = "Roster", description = "Family roster management"),
        (name = "Moments", description = "Extracted happy moments"),
    ),
    components(
        schemas(
            StartSessionRequest,
            StartSessionResponse,
            MessageRequest,
            MessageResponse,
            TurnResponse,
            PersonaResponse,
            AddMemberRequest,
            RemoveMemberResponse,
            ProfileResponse,
            MomentResponse,
            SceneResponse,
            SceneDetail,
            EndSessionResponse,
        )
    ),
)]
pub struct ApiDoc;
