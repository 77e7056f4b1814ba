//! User handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use newswire_common::{
    db::{models::User, Repository},
    errors::{AppError, Result},
};
use serde::Serialize;

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Get a user by username
///
/// Usernames are free-form, so there is no syntactic check; an unknown
/// username (numeric-looking or not) is a missing-row error.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>> {
    let repo = Repository::new(state.db.clone());

    let user = repo
        .find_user(&username)
        .await?
        .ok_or(AppError::UserNotFound { username })?;

    Ok(Json(UserResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_shape() {
        let response = UserResponse {
            user: User {
                username: "butter_bridge".into(),
                avatar_url: "https://example.com/avatar.jpg".into(),
                name: "jonny".into(),
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "user": {
                    "username": "butter_bridge",
                    "avatar_url": "https://example.com/avatar.jpg",
                    "name": "jonny"
                }
            })
        );
    }
}
