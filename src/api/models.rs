use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::{ServiceError, SettlementError};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RenameGroupRequest {
    pub name: String,
    pub renamed_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteGroupRequest {
    pub deleted_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct InviteMemberRequest {
    pub email: String,
    pub invited_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub paid_by_id: String,
    /// Major currency units; rounded once to minor units on arrival
    pub amount: f64,
    pub description: String,
}

#[derive(Deserialize, IntoParams)]
pub struct MemberQuery {
    /// Member on whose behalf the request is made
    pub member_id: String,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for ServiceError to implement IntoResponse
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::UserNotFound(_) | ServiceError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            ServiceError::NotGroupMember(_) | ServiceError::NotGroupOwner(_) => StatusCode::FORBIDDEN,
            ServiceError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            ServiceError::Settlement(err) => match err {
                SettlementError::InvalidRoster(_)
                | SettlementError::NonPositiveAmount { .. }
                | SettlementError::NoParticipants(_) => StatusCode::BAD_REQUEST,
                // Stored records disagree with the roster: a consistency bug, not a client error
                SettlementError::UnknownPayer { .. }
                | SettlementError::UnknownParticipant { .. }
                | SettlementError::AmountOverflow(_)
                | SettlementError::Unbalanced(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServiceError::StorageError(_) | ServiceError::LoggingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self.0 {
            ServiceError::InvalidInput(_, field_error) => {
                format!("{}: {}", field_error.title, field_error.description)
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
