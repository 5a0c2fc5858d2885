use super::member::MemberId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directory entry giving a member its display identity.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: MemberId,
    pub email: String,
}
