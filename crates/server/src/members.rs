//! Member API endpoints

use api_types::member::{MemberNew, MemberView, MembersResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ApiJson, ServerError, server::ServerState};

fn view(member: engine::Member) -> MemberView {
    MemberView {
        id: member.id,
        name: member.name,
        created_at: member.created_at,
    }
}

/// Handle requests for listing the group members
pub async fn list(State(state): State<ServerState>) -> Result<Json<MembersResponse>, ServerError> {
    let members = state.engine.list_members().await?;

    Ok(Json(MembersResponse {
        members: members.into_iter().map(view).collect(),
    }))
}

/// Handle requests for adding a new member
pub async fn member_new(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<MemberNew>,
) -> Result<(StatusCode, Json<MemberView>), ServerError> {
    let member = state.engine.add_member(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(view(member))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_member(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
