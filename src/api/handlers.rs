use crate::{
    api::models::*,
    core::{
        models::{ExpenseRecord, Group, MemberId, User, audit::AppLog},
        services::{GroupDetails, GroupService},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub type SharedService = Arc<GroupService<InMemoryLogging, InMemoryStorage>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/users", post(register_user))
        .route("/groups", post(create_group).get(list_groups))
        .route(
            "/groups/{group_id}",
            get(get_group_details).put(rename_group).delete(delete_group),
        )
        .route("/groups/{group_id}/members", post(invite_member))
        .route("/groups/{group_id}/expenses", post(add_expense))
        .route("/groups/{group_id}/logs", get(get_group_logs))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub(crate) async fn register_user(
    State(service): State<SharedService>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.register_user(&req.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Invalid group name", body = ErrorResponse),
        (status = 404, description = "Creator not found", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<SharedService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service
        .create_group(&req.name, &MemberId::from(req.created_by_id))
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    params(MemberQuery),
    responses(
        (status = 200, description = "Groups the member belongs to", body = [Group]),
        (status = 404, description = "Member not found", body = ErrorResponse)
    )
)]
pub(crate) async fn list_groups(
    State(service): State<SharedService>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.list_groups(&MemberId::from(query.member_id)).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "Group ID"),
        MemberQuery
    ),
    responses(
        (status = 200, description = "Group, expenses, balances and settle-up plan", body = GroupDetails),
        (status = 403, description = "Viewer is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Stored expenses are inconsistent with the roster", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_details(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<GroupDetails>, ApiError> {
    let details = service
        .get_group_details(&group_id, &MemberId::from(query.member_id))
        .await?;
    Ok(Json(details))
}

#[utoipa::path(
    put,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = RenameGroupRequest,
    responses(
        (status = 200, description = "Group renamed", body = Group),
        (status = 400, description = "Invalid group name", body = ErrorResponse),
        (status = 403, description = "Only the creator can rename", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn rename_group(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<RenameGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .rename_group(&group_id, &req.name, &MemberId::from(req.renamed_by_id))
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = DeleteGroupRequest,
    responses(
        (status = 200, description = "Group and its expenses deleted"),
        (status = 403, description = "Only the creator can delete", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_group(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<DeleteGroupRequest>,
) -> Result<StatusCode, ApiError> {
    service
        .delete_group(&group_id, &MemberId::from(req.deleted_by_id))
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = InviteMemberRequest,
    responses(
        (status = 200, description = "Member added", body = Group),
        (status = 403, description = "Inviter is not a group member", body = ErrorResponse),
        (status = 404, description = "Group or user not found", body = ErrorResponse)
    )
)]
pub(crate) async fn invite_member(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<InviteMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .invite_member(&group_id, &req.email, &MemberId::from(req.invited_by_id))
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded", body = ExpenseRecord),
        (status = 400, description = "Invalid amount or description", body = ErrorResponse),
        (status = 403, description = "Payer is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn add_expense(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseRecord>), ApiError> {
    let record = service
        .add_expense(
            &group_id,
            &MemberId::from(req.paid_by_id),
            req.amount,
            &req.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application action log", body = [AppLog])
    )
)]
pub(crate) async fn get_app_logs(State(service): State<SharedService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/logs",
    params(
        ("group_id" = String, Path, description = "Group ID"),
        MemberQuery
    ),
    responses(
        (status = 200, description = "Actions recorded against the group", body = [AppLog]),
        (status = 403, description = "Viewer is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_logs(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service
        .get_group_logs(&group_id, &MemberId::from(query.member_id))
        .await?;
    Ok(Json(logs))
}
