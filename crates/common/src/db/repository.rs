//! Repository pattern for database operations
//!
//! One method per store operation; list and mutation statements come from
//! [`crate::db::query`] and run as single round trips. The store's own
//! atomicity arbitrates concurrent vote adjustments and deletes.

use crate::db::models::{Comment, Topic, TopicEntity, User, UserEntity};
use crate::db::query::{self, ArticleListQuery, CommentListQuery};
use crate::db::DbPool;
use crate::errors::Result;
use crate::validation::NewComment;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult};
use serde::{Deserialize, Serialize};

/// An article row with its derived comment count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct ArticleRecord {
    pub article_id: i32,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub author: String,
    pub votes: i32,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub comment_count: i64,
}

/// An article row as returned by a mutation (no aggregate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct ArticleRow {
    pub article_id: i32,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub author: String,
    pub votes: i32,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Topic Operations
    // ========================================================================

    /// List all topics
    pub async fn list_topics(&self) -> Result<Vec<Topic>> {
        TopicEntity::find()
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // User Operations
    // ========================================================================

    /// Find a user by username
    pub async fn find_user(&self, username: &str) -> Result<Option<User>> {
        UserEntity::find_by_id(username)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Article Operations
    // ========================================================================

    /// List articles with filters, sort, and derived comment counts
    pub async fn list_articles(&self, params: ArticleListQuery) -> Result<Vec<ArticleRecord>> {
        ArticleRecord::find_by_statement(params.into_statement())
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Find one article with its derived comment count
    pub async fn find_article(&self, article_id: i32) -> Result<Option<ArticleRecord>> {
        ArticleRecord::find_by_statement(query::select_article(article_id))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Adjust an article's votes by delta in one atomic statement.
    /// Returns None when there is no such article.
    pub async fn adjust_article_votes(
        &self,
        article_id: i32,
        delta: i32,
    ) -> Result<Option<ArticleRow>> {
        ArticleRow::find_by_statement(query::adjust_article_votes(article_id, delta))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Comment Operations
    // ========================================================================

    /// List comments for one article
    pub async fn list_comments(&self, params: CommentListQuery) -> Result<Vec<Comment>> {
        Comment::find_by_statement(params.into_statement())
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Create a comment on an article. A missing article or author surfaces
    /// as a foreign-key violation, which the error classifier maps to a
    /// missing-row error.
    pub async fn create_comment(
        &self,
        article_id: i32,
        comment: NewComment,
    ) -> Result<Comment> {
        let inserted = Comment::find_by_statement(query::insert_comment(article_id, comment))
            .one(self.conn())
            .await?;

        inserted.ok_or_else(|| crate::errors::AppError::Internal {
            message: "INSERT ... RETURNING produced no row".to_string(),
        })
    }

    /// Adjust a comment's votes by delta in one atomic statement.
    /// Returns None when there is no such comment.
    pub async fn adjust_comment_votes(
        &self,
        comment_id: i32,
        delta: i32,
    ) -> Result<Option<Comment>> {
        Comment::find_by_statement(query::adjust_comment_votes(comment_id, delta))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Delete a comment by primary key. Returns true when a row was
    /// actually removed.
    pub async fn delete_comment(&self, comment_id: i32) -> Result<bool> {
        let result = self.conn().execute(query::delete_comment(comment_id)).await?;
        Ok(result.rows_affected() > 0)
    }
}
