//! SeaORM entity models
//!
//! Database entities for the forum corpus: topics and users are seed data,
//! articles are read and vote-adjusted, comments are created, vote-adjusted
//! and hard-deleted.

mod article;
mod comment;
mod topic;
mod user;

pub use article::{
    ActiveModel as ArticleActiveModel,
    Column as ArticleColumn,
    Entity as ArticleEntity,
    Model as Article,
};

pub use comment::{
    ActiveModel as CommentActiveModel,
    Column as CommentColumn,
    Entity as CommentEntity,
    Model as Comment,
};

pub use topic::{
    ActiveModel as TopicActiveModel,
    Column as TopicColumn,
    Entity as TopicEntity,
    Model as Topic,
};

pub use user::{
    ActiveModel as UserActiveModel,
    Column as UserColumn,
    Entity as UserEntity,
    Model as User,
};
