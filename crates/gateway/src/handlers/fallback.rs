//! Routing fallbacks
//!
//! 404 is reserved for paths that match no route at all; a matched path hit
//! with an unsupported method is a 405. Both reuse the error taxonomy so
//! the `{"msg": ...}` body shape stays uniform.

use newswire_common::errors::AppError;

/// Fallback for unmatched routes
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// Fallback for matched routes hit with an unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_route_not_found_response() {
        let response = route_not_found().await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_not_allowed_response() {
        let response = method_not_allowed().await.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
