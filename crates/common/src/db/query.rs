//! Parameterized query construction for list and mutation operations
//!
//! Every statement built here follows two rules: user-supplied values only
//! enter the query as `$n` binds, and user-supplied identifiers (sort
//! columns, directions) only enter the query text after resolving through
//! the fixed allow-lists in [`crate::validation`].

use crate::validation::{ArticleSortColumn, CommentSortColumn, NewComment, SortOrder};
use sea_orm::{DbBackend, Statement, Value};

/// Columns returned for every article read
const ARTICLE_COLUMNS: &str =
    "articles.article_id, articles.title, articles.body, articles.topic, \
     articles.author, articles.votes, articles.created_at";

/// Columns returned for every comment read
const COMMENT_COLUMNS: &str =
    "comments.comment_id, comments.author, comments.article_id, \
     comments.votes, comments.created_at, comments.body";

/// Validated parameters for the articles listing
#[derive(Debug, Clone, Default)]
pub struct ArticleListQuery {
    pub author: Option<String>,
    pub topic: Option<String>,
    pub sort_by: ArticleSortColumn,
    pub order: SortOrder,
}

impl ArticleListQuery {
    /// Build the listing statement.
    ///
    /// The LEFT JOIN plus GROUP BY on the primary key yields exactly one row
    /// per article with `comment_count` as a bigint aggregate, zero
    /// included. Filter predicates are conjunctive. Ties on non-unique sort
    /// columns break by `article_id` ascending so identical inputs always
    /// produce identical output order.
    pub fn into_statement(self) -> Statement {
        let mut predicates: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(author) = self.author {
            values.push(author.into());
            predicates.push(format!("articles.author = ${}", values.len()));
        }

        if let Some(topic) = self.topic {
            values.push(topic.into());
            predicates.push(format!("articles.topic = ${}", values.len()));
        }

        let where_clause = if predicates.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", predicates.join(" AND "))
        };

        let sql = format!(
            "SELECT {columns}, \
                    COUNT(comments.comment_id)::bigint AS comment_count \
             FROM articles \
             LEFT JOIN comments ON comments.article_id = articles.article_id \
             {where_clause} \
             GROUP BY articles.article_id \
             ORDER BY {sort} {dir}, articles.article_id ASC",
            columns = ARTICLE_COLUMNS,
            where_clause = where_clause,
            sort = self.sort_by.as_sql(),
            dir = self.order.as_sql(),
        );

        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

/// Validated parameters for the comments-per-article listing
#[derive(Debug, Clone)]
pub struct CommentListQuery {
    pub article_id: i32,
    pub sort_by: CommentSortColumn,
    pub order: SortOrder,
}

impl CommentListQuery {
    pub fn into_statement(self) -> Statement {
        let sql = format!(
            "SELECT {columns} \
             FROM comments \
             WHERE comments.article_id = $1 \
             ORDER BY {sort} {dir}, comments.comment_id ASC",
            columns = COMMENT_COLUMNS,
            sort = self.sort_by.as_sql(),
            dir = self.order.as_sql(),
        );

        Statement::from_sql_and_values(DbBackend::Postgres, sql, [self.article_id.into()])
    }
}

/// Single-article read with its derived comment count
pub fn select_article(article_id: i32) -> Statement {
    let sql = format!(
        "SELECT {columns}, \
                COUNT(comments.comment_id)::bigint AS comment_count \
         FROM articles \
         LEFT JOIN comments ON comments.article_id = articles.article_id \
         WHERE articles.article_id = $1 \
         GROUP BY articles.article_id",
        columns = ARTICLE_COLUMNS,
    );

    Statement::from_sql_and_values(DbBackend::Postgres, sql, [article_id.into()])
}

/// Atomic vote adjustment for an article. One round trip, no
/// read-modify-write; delta 0 still returns the current row.
pub fn adjust_article_votes(article_id: i32, delta: i32) -> Statement {
    let sql = format!(
        "UPDATE articles SET votes = votes + $1 \
         WHERE article_id = $2 \
         RETURNING {columns}",
        columns = ARTICLE_COLUMNS,
    );

    Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [delta.into(), article_id.into()],
    )
}

/// Atomic vote adjustment for a comment
pub fn adjust_comment_votes(comment_id: i32, delta: i32) -> Statement {
    let sql = format!(
        "UPDATE comments SET votes = votes + $1 \
         WHERE comment_id = $2 \
         RETURNING {columns}",
        columns = COMMENT_COLUMNS,
    );

    Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [delta.into(), comment_id.into()],
    )
}

/// Comment insertion; the store's foreign keys enforce that the article and
/// the author exist at write time.
pub fn insert_comment(article_id: i32, comment: NewComment) -> Statement {
    let sql = format!(
        "INSERT INTO comments (author, article_id, body) \
         VALUES ($1, $2, $3) \
         RETURNING {columns}",
        columns = COMMENT_COLUMNS,
    );

    Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [comment.username.into(), article_id.into(), comment.body.into()],
    )
}

/// Delete exactly one comment by primary key; rows_affected distinguishes
/// deleted (1) from not-found (0).
pub fn delete_comment(comment_id: i32) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        "DELETE FROM comments WHERE comment_id = $1",
        [comment_id.into()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind_count(stmt: &Statement) -> usize {
        stmt.values.as_ref().map(|v| v.0.len()).unwrap_or(0)
    }

    #[test]
    fn test_article_list_defaults() {
        let stmt = ArticleListQuery::default().into_statement();

        assert!(stmt.sql.contains("LEFT JOIN comments"));
        assert!(stmt.sql.contains("GROUP BY articles.article_id"));
        assert!(stmt
            .sql
            .contains("ORDER BY articles.created_at DESC, articles.article_id ASC"));
        assert!(!stmt.sql.contains("WHERE"));
        assert_eq!(bind_count(&stmt), 0);
    }

    #[test]
    fn test_article_list_filters_are_conjunctive_binds() {
        let stmt = ArticleListQuery {
            author: Some("rogersop".into()),
            topic: Some("mitch".into()),
            ..Default::default()
        }
        .into_statement();

        assert!(stmt
            .sql
            .contains("WHERE articles.author = $1 AND articles.topic = $2"));
        assert_eq!(bind_count(&stmt), 2);
        // Filter values never appear in the query text
        assert!(!stmt.sql.contains("rogersop"));
        assert!(!stmt.sql.contains("mitch"));
    }

    #[test]
    fn test_article_list_single_filter_renumbers() {
        let stmt = ArticleListQuery {
            topic: Some("cats".into()),
            ..Default::default()
        }
        .into_statement();

        assert!(stmt.sql.contains("WHERE articles.topic = $1"));
        assert_eq!(bind_count(&stmt), 1);
    }

    #[test]
    fn test_article_list_derived_sort_column() {
        let stmt = ArticleListQuery {
            sort_by: ArticleSortColumn::CommentCount,
            order: SortOrder::Asc,
            ..Default::default()
        }
        .into_statement();

        assert!(stmt
            .sql
            .contains("ORDER BY comment_count ASC, articles.article_id ASC"));
    }

    #[test]
    fn test_comment_count_is_bigint() {
        let stmt = select_article(1);
        assert!(stmt
            .sql
            .contains("COUNT(comments.comment_id)::bigint AS comment_count"));
        assert_eq!(bind_count(&stmt), 1);
    }

    #[test]
    fn test_comment_list_statement() {
        let stmt = CommentListQuery {
            article_id: 1,
            sort_by: CommentSortColumn::Author,
            order: SortOrder::Desc,
        }
        .into_statement();

        assert!(stmt.sql.contains("WHERE comments.article_id = $1"));
        assert!(stmt
            .sql
            .contains("ORDER BY comments.author DESC, comments.comment_id ASC"));
        assert_eq!(bind_count(&stmt), 1);
    }

    #[test]
    fn test_vote_adjust_is_single_statement() {
        let stmt = adjust_article_votes(1, -50);
        assert!(stmt.sql.starts_with("UPDATE articles SET votes = votes + $1"));
        assert!(stmt.sql.contains("RETURNING"));
        assert_eq!(bind_count(&stmt), 2);

        let stmt = adjust_comment_votes(1, 0);
        assert!(stmt.sql.starts_with("UPDATE comments SET votes = votes + $1"));
        assert_eq!(bind_count(&stmt), 2);
    }

    #[test]
    fn test_insert_comment_binds_everything() {
        let stmt = insert_comment(
            1,
            NewComment {
                username: "butter_bridge".into(),
                body: "This is a fantastic article".into(),
            },
        );

        assert!(stmt.sql.contains("INSERT INTO comments"));
        assert!(stmt.sql.contains("RETURNING"));
        assert_eq!(bind_count(&stmt), 3);
        assert!(!stmt.sql.contains("butter_bridge"));
    }

    #[test]
    fn test_delete_comment() {
        let stmt = delete_comment(9999);
        assert_eq!(stmt.sql, "DELETE FROM comments WHERE comment_id = $1");
        assert_eq!(bind_count(&stmt), 1);
    }
}
