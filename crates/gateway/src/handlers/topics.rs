//! Topic handlers

use crate::AppState;
use axum::{extract::State, Json};
use newswire_common::{
    db::{models::Topic, Repository},
    errors::Result,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

/// List all topics
pub async fn list_topics(State(state): State<AppState>) -> Result<Json<TopicsResponse>> {
    let repo = Repository::new(state.db.clone());

    let topics = repo.list_topics().await?;

    Ok(Json(TopicsResponse { topics }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_is_keyed_by_resource_name() {
        let response = TopicsResponse {
            topics: vec![Topic {
                slug: "mitch".into(),
                description: "The man, the Mitch, the legend".into(),
            }],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "topics": [
                    { "slug": "mitch", "description": "The man, the Mitch, the legend" }
                ]
            })
        );
    }
}
