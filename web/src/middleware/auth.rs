use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use service::AppState;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
pub(crate) struct ApiKeyParam {
    api_key: Option<String>,
}

/// API-key middleware for the versioned API surface.
///
/// A request authenticates by presenting one of the configured static keys in
/// the `x-api-key` header or, for transports that cannot set headers (the
/// browser WebSocket API), in the `api_key` query parameter. Anything else
/// gets 401 before reaching a handler.
pub async fn require_api_key(
    State(app_state): State<AppState>,
    Query(params): Query<ApiKeyParam>,
    request: Request,
    next: Next,
) -> Response {
    let header_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match header_key.or(params.api_key.as_deref()) {
        Some(key) if app_state.config.api_key_is_valid(key) => next.run(request).await,
        _ => (StatusCode::UNAUTHORIZED, "Invalid or missing API Key").into_response(),
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        response::Response,
        routing::get,
        Router,
    };
    use clap::Parser;
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "authenticated"
    }

    fn test_app() -> Router {
        let config = Config::parse_from(["relay_platform_rs", "--api-key-1", "valid-key"]);
        let db = Arc::new(
            sea_orm::MockDatabase::new(sea_orm::DatabaseBackend::Postgres).into_connection(),
        );
        let app_state = AppState::new(config, &db);

        Router::new()
            .route("/test", get(test_handler))
            .route_layer(from_fn_with_state(app_state.clone(), require_api_key))
            .with_state(app_state)
    }

    #[tokio::test]
    async fn request_without_a_key_is_rejected() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response: Response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_an_unknown_key_is_rejected() {
        let request = Request::builder()
            .uri("/test")
            .header("x-api-key", "wrong-key")
            .body(Body::empty())
            .unwrap();
        let response: Response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_a_valid_header_key_proceeds() {
        let request = Request::builder()
            .uri("/test")
            .header("x-api-key", "valid-key")
            .body(Body::empty())
            .unwrap();
        let response: Response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn request_with_a_valid_query_key_proceeds() {
        let request = Request::builder()
            .uri("/test?api_key=valid-key")
            .body(Body::empty())
            .unwrap();
        let response: Response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
