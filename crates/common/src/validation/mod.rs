//! Request validation
//!
//! Pure structural checks on path/query parameters and request bodies.
//! Everything here runs before any query is built: identifiers must parse,
//! sort keys must resolve against a fixed per-resource allow-list, and
//! bodies must carry exactly the expected keys. Rejections all classify as
//! `AppError::BadRequest`.

use crate::errors::{AppError, Result};
use serde_json::Value;

/// Parse a path identifier. Non-numeric input is a 400, not a 404.
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.trim().parse::<i32>().map_err(|_| AppError::BadRequest)
}

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse the `order` query parameter. Absent means descending,
    /// most-recent-first.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::Desc),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(_) => Err(AppError::BadRequest),
        }
    }

    /// Trusted SQL fragment for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Allow-listed sort columns for the articles listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    /// Derived aggregate, sortable like any numeric column
    CommentCount,
}

impl ArticleSortColumn {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::CreatedAt),
            Some("article_id") => Ok(Self::ArticleId),
            Some("title") => Ok(Self::Title),
            Some("topic") => Ok(Self::Topic),
            Some("author") => Ok(Self::Author),
            Some("created_at") => Ok(Self::CreatedAt),
            Some("votes") => Ok(Self::Votes),
            Some("comment_count") => Ok(Self::CommentCount),
            Some(_) => Err(AppError::BadRequest),
        }
    }

    /// Resolved, trusted column identifier. User input never reaches query
    /// text except through this mapping.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::ArticleId => "articles.article_id",
            Self::Title => "articles.title",
            Self::Topic => "articles.topic",
            Self::Author => "articles.author",
            Self::CreatedAt => "articles.created_at",
            Self::Votes => "articles.votes",
            Self::CommentCount => "comment_count",
        }
    }
}

/// Allow-listed sort columns for the comments listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSortColumn {
    CommentId,
    Author,
    Votes,
    #[default]
    CreatedAt,
}

impl CommentSortColumn {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::CreatedAt),
            Some("comment_id") => Ok(Self::CommentId),
            Some("author") => Ok(Self::Author),
            Some("votes") => Ok(Self::Votes),
            Some("created_at") => Ok(Self::CreatedAt),
            Some(_) => Err(AppError::BadRequest),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::CommentId => "comments.comment_id",
            Self::Author => "comments.author",
            Self::Votes => "comments.votes",
            Self::CreatedAt => "comments.created_at",
        }
    }
}

/// Accepted body for comment creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

/// Validate a vote-adjust body: `{}` or `{"inc_votes": <integer>}`.
///
/// An absent key is a legal no-op (delta 0). Extra keys, non-object bodies,
/// and non-integer values are all rejected.
pub fn vote_delta(body: &Value) -> Result<i32> {
    let obj = body.as_object().ok_or(AppError::BadRequest)?;

    if obj.keys().any(|key| key != "inc_votes") {
        return Err(AppError::BadRequest);
    }

    match obj.get("inc_votes") {
        None => Ok(0),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(AppError::BadRequest),
    }
}

/// Validate a comment-creation body: exactly `username` and `body`, both
/// strings.
pub fn new_comment(body: &Value) -> Result<NewComment> {
    let obj = body.as_object().ok_or(AppError::BadRequest)?;

    if obj.len() != 2 {
        return Err(AppError::BadRequest);
    }

    let username = obj
        .get("username")
        .and_then(Value::as_str)
        .ok_or(AppError::BadRequest)?;
    let text = obj
        .get("body")
        .and_then(Value::as_str)
        .ok_or(AppError::BadRequest)?;

    Ok(NewComment {
        username: username.to_string(),
        body: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("99999").unwrap(), 99999);
        assert!(matches!(parse_id("animal"), Err(AppError::BadRequest)));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest)));
        assert!(matches!(parse_id(""), Err(AppError::BadRequest)));
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::parse(None).unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("asc")).unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")).unwrap(), SortOrder::Desc);
        assert!(SortOrder::parse(Some("ASC")).is_err());
        assert!(SortOrder::parse(Some("sideways")).is_err());
    }

    #[test]
    fn test_article_sort_allow_list() {
        for raw in [
            "article_id",
            "title",
            "topic",
            "author",
            "created_at",
            "votes",
            "comment_count",
        ] {
            assert!(ArticleSortColumn::parse(Some(raw)).is_ok(), "{raw} should be allowed");
        }

        assert_eq!(
            ArticleSortColumn::parse(None).unwrap(),
            ArticleSortColumn::CreatedAt
        );
        assert!(ArticleSortColumn::parse(Some("invalid_column")).is_err());
        assert!(ArticleSortColumn::parse(Some("body")).is_err());
        // No raw SQL sneaks through the allow-list
        assert!(ArticleSortColumn::parse(Some("votes; DROP TABLE articles")).is_err());
    }

    #[test]
    fn test_comment_sort_allow_list() {
        for raw in ["comment_id", "author", "votes", "created_at"] {
            assert!(CommentSortColumn::parse(Some(raw)).is_ok(), "{raw} should be allowed");
        }

        assert_eq!(
            CommentSortColumn::parse(None).unwrap(),
            CommentSortColumn::CreatedAt
        );
        assert!(CommentSortColumn::parse(Some("invalid_column")).is_err());
        // Valid for articles, not for comments
        assert!(CommentSortColumn::parse(Some("topic")).is_err());
    }

    #[test]
    fn test_vote_delta() {
        assert_eq!(vote_delta(&json!({ "inc_votes": 50 })).unwrap(), 50);
        assert_eq!(vote_delta(&json!({ "inc_votes": -50 })).unwrap(), -50);
        // Absent key is a no-op adjustment
        assert_eq!(vote_delta(&json!({})).unwrap(), 0);
    }

    #[test]
    fn test_vote_delta_rejections() {
        assert!(vote_delta(&json!({ "inc_votes": "cat" })).is_err());
        assert!(vote_delta(&json!({ "inc_votes": 1.5 })).is_err());
        assert!(vote_delta(&json!({ "inc_votes": true })).is_err());
        assert!(vote_delta(&json!({ "inc_votes": 1, "name": "Mitch" })).is_err());
        assert!(vote_delta(&json!({ "votes": 1 })).is_err());
        assert!(vote_delta(&json!("inc_votes")).is_err());
        assert!(vote_delta(&json!(null)).is_err());
    }

    #[test]
    fn test_new_comment() {
        let comment = new_comment(&json!({
            "username": "butter_bridge",
            "body": "This is a fantastic article"
        }))
        .unwrap();
        assert_eq!(comment.username, "butter_bridge");
        assert_eq!(comment.body, "This is a fantastic article");
    }

    #[test]
    fn test_new_comment_rejections() {
        // Missing key
        assert!(new_comment(&json!({ "body": "What an awesome article" })).is_err());
        // Wrong value types
        assert!(new_comment(&json!({ "username": 5, "body": 99999 })).is_err());
        // Wrong keys
        assert!(new_comment(&json!({ "topic": "mitch", "body": "nice article" })).is_err());
        // Extra key alongside the expected two
        assert!(new_comment(
            &json!({ "username": "butter_bridge", "body": "hi", "votes": 3 })
        )
        .is_err());
        // Not an object
        assert!(new_comment(&json!([])).is_err());
    }
}
