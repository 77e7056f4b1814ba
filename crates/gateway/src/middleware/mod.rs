//! Gateway middleware

pub mod observe;
