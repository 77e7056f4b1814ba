//! Article handlers
//!
//! Articles are read and vote-adjusted only; there is no create or delete
//! path. List reads carry the derived `comment_count` aggregate, mutations
//! return the bare row.

use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use newswire_common::{
    db::{query::ArticleListQuery, ArticleRecord, ArticleRow, Repository},
    errors::{AppError, Result},
    validation::{self, ArticleSortColumn, SortOrder},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized query parameters for the articles listing. Unknown
/// parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub author: Option<String>,
    pub topic: Option<String>,
}

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleRecord>,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub article: ArticleRecord,
}

#[derive(Serialize)]
pub struct PatchedArticleResponse {
    pub article: ArticleRow,
}

/// List articles with optional filters and sort
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> Result<Json<ArticlesResponse>> {
    let query = resolve_list_params(params)?;

    let repo = Repository::new(state.db.clone());
    let articles = repo.list_articles(query).await?;

    Ok(Json(ArticlesResponse { articles }))
}

/// Get a single article with its comment count
pub async fn get_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ArticleResponse>> {
    let article_id = validation::parse_id(&raw_id)?;

    let repo = Repository::new(state.db.clone());
    let article = repo
        .find_article(article_id)
        .await?
        .ok_or(AppError::ArticleNotFound { id: article_id })?;

    Ok(Json(ArticleResponse { article }))
}

/// Adjust an article's votes by the body's `inc_votes` delta
pub async fn patch_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PatchedArticleResponse>> {
    let article_id = validation::parse_id(&raw_id)?;
    let Json(body) = body.map_err(|_| AppError::BadRequest)?;
    let delta = validation::vote_delta(&body)?;

    let repo = Repository::new(state.db.clone());
    let article = repo
        .adjust_article_votes(article_id, delta)
        .await?
        .ok_or(AppError::IdNotFound)?;

    tracing::info!(article_id, delta, votes = article.votes, "Article votes adjusted");

    Ok(Json(PatchedArticleResponse { article }))
}

/// Resolve raw listing parameters through the allow-lists
fn resolve_list_params(params: ArticleListParams) -> Result<ArticleListQuery> {
    Ok(ArticleListQuery {
        sort_by: ArticleSortColumn::parse(params.sort_by.as_deref())?,
        order: SortOrder::parse(params.order.as_deref())?,
        author: params.author,
        topic: params.topic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_defaults() {
        let query = resolve_list_params(ArticleListParams::default()).unwrap();
        assert_eq!(query.sort_by, ArticleSortColumn::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.author.is_none());
        assert!(query.topic.is_none());
    }

    #[test]
    fn test_resolve_filters_pass_through() {
        let query = resolve_list_params(ArticleListParams {
            sort_by: Some("votes".into()),
            order: Some("asc".into()),
            author: Some("rogersop".into()),
            topic: Some("mitch".into()),
        })
        .unwrap();

        assert_eq!(query.sort_by, ArticleSortColumn::Votes);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.author.as_deref(), Some("rogersop"));
        assert_eq!(query.topic.as_deref(), Some("mitch"));
    }

    #[test]
    fn test_resolve_rejects_unknown_sort_column() {
        let result = resolve_list_params(ArticleListParams {
            sort_by: Some("invalid_column".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::BadRequest)));
    }

    #[test]
    fn test_article_response_shape() {
        let response = ArticleResponse {
            article: ArticleRecord {
                article_id: 1,
                title: "Living in the shadow of a great man".into(),
                body: "I find this existence challenging".into(),
                topic: "mitch".into(),
                author: "butter_bridge".into(),
                votes: 100,
                created_at: "2018-11-15T12:21:54.171Z".parse().unwrap(),
                comment_count: 13,
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        // The derived aggregate is a number, not a string
        assert_eq!(value["article"]["comment_count"], json!(13));
        assert_eq!(value["article"]["article_id"], json!(1));
        assert_eq!(value["article"]["votes"], json!(100));
    }
}
