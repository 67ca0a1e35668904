//! HTTP adapters - REST API implementations.
//!
//! `build_router` assembles the public router with the cross-cutting
//! layers (request ids, tracing, body limit, timeout).

pub mod webhooks;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

// Re-export key types for convenience
pub use webhooks::{webhook_router, WebhookAppState};

/// Build the application router with middleware applied.
pub fn build_router(state: WebhookAppState, server: &ServerConfig) -> Router {
    webhook_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(server.body_limit()))
            // Timeout needs a `Default` response body, so it sits directly on the routes.
            .layer(TimeoutLayer::new(server.request_timeout())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::InMemorySubscriptionStore;
    use crate::config::PaymentConfig;

    fn layered_app(server: &ServerConfig) -> Router {
        let state = WebhookAppState::from_config(
            &PaymentConfig::new("whsec_router_layers"),
            Arc::new(InMemorySubscriptionStore::new()),
        );
        build_router(state, server)
    }

    #[tokio::test]
    async fn layered_router_tags_responses_with_request_id() {
        let response = layered_app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/webhooks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn declared_length_over_limit_is_refused_before_the_handler() {
        let server = ServerConfig {
            max_body_bytes: 8,
            ..ServerConfig::default()
        };

        let response = layered_app(&server)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/webhooks")
                    .header(header::CONTENT_LENGTH, 32)
                    .body(Body::from(vec![b'{'; 32]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
