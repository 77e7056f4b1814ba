//! API handlers module

pub mod articles;
pub mod comments;
pub mod fallback;
pub mod health;
pub mod topics;
pub mod users;
