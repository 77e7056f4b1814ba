//! Comment handlers
//!
//! Comments are created, vote-adjusted, and hard-deleted. Creation relies
//! on the store's foreign keys for the article/author existence check; the
//! error classifier turns a violation into a missing-row response.

use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use newswire_common::{
    db::{models::Comment, query::CommentListQuery, Repository},
    errors::{AppError, Result},
    validation::{self, CommentSortColumn, SortOrder},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized query parameters for the comments listing. Unknown
/// parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

/// List the comments on one article
pub async fn list_comments(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<CommentListParams>,
) -> Result<Json<CommentsResponse>> {
    let article_id = validation::parse_id(&raw_id)?;
    let sort_by = CommentSortColumn::parse(params.sort_by.as_deref())?;
    let order = SortOrder::parse(params.order.as_deref())?;

    let repo = Repository::new(state.db.clone());

    // An article with no comments lists as empty; a missing article is an
    // error, and the two are distinguishable only by checking the article.
    repo.find_article(article_id)
        .await?
        .ok_or(AppError::ArticleNotFound { id: article_id })?;

    let comments = repo
        .list_comments(CommentListQuery {
            article_id,
            sort_by,
            order,
        })
        .await?;

    Ok(Json(CommentsResponse { comments }))
}

/// Create a comment on an article
pub async fn post_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentResponse>)> {
    let article_id = validation::parse_id(&raw_id)?;
    let Json(body) = body.map_err(|_| AppError::BadRequest)?;
    let new_comment = validation::new_comment(&body)?;

    let repo = Repository::new(state.db.clone());
    let comment = repo.create_comment(article_id, new_comment).await?;

    tracing::info!(
        comment_id = comment.comment_id,
        article_id,
        author = %comment.author,
        "Comment created"
    );

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// Adjust a comment's votes by the body's `inc_votes` delta
pub async fn patch_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CommentResponse>> {
    let comment_id = validation::parse_id(&raw_id)?;
    let Json(body) = body.map_err(|_| AppError::BadRequest)?;
    let delta = validation::vote_delta(&body)?;

    let repo = Repository::new(state.db.clone());
    let comment = repo
        .adjust_comment_votes(comment_id, delta)
        .await?
        .ok_or(AppError::IdNotFound)?;

    tracing::info!(comment_id, delta, votes = comment.votes, "Comment votes adjusted");

    Ok(Json(CommentResponse { comment }))
}

/// Delete a comment by id
///
/// Idempotent in effect, not in status: the first delete of an id is a
/// 204, any repeat is a missing-row error.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let comment_id = validation::parse_id(&raw_id)?;

    let repo = Repository::new(state.db.clone());
    let deleted = repo.delete_comment(comment_id).await?;

    if !deleted {
        return Err(AppError::DeleteTargetNotFound { id: comment_id });
    }

    tracing::info!(comment_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_response_shape() {
        let response = CommentResponse {
            comment: Comment {
                comment_id: 1,
                author: "butter_bridge".into(),
                article_id: 9,
                votes: 16,
                created_at: "2017-11-22T12:36:03.389Z".parse().unwrap(),
                body: "Oh, I've got compassion running out of my nose, pal!".into(),
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        let comment = &value["comment"];
        for key in ["comment_id", "author", "article_id", "votes", "created_at", "body"] {
            assert!(comment.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(comment["votes"], json!(16));
        assert_eq!(comment["article_id"], json!(9));
    }
}
