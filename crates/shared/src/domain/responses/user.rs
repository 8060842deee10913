use crate::{model::user::UserModel, utils::format_datetime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(rename = "created_at")]
    pub created_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.user_id,
            username: user.username,
            created_at: format_datetime(user.created_at),
        }
    }
}
