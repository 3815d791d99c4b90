use crate::assets;
use crate::config;
use crate::state;
use crate::store;

use axum::Router;
use axum::routing::get;
use axum::routing::post;

mod push;

pub fn app(config: config::AppConfig) -> Router {
    let state = state::AppState {
        config,
        store: store::SubscriptionStore::new(),
    };
    app_with_state(state)
}

pub(crate) fn app_with_state(state: state::AppState) -> Router {
    Router::new()
        .route("/", get(push::subscribe_page))
        .route("/api/push/public-key", get(push::push_public_key))
        .route("/api/save-subscription", post(push::save_subscription))
        .route("/api/remove-subscription", post(push::remove_subscription))
        .route("/api/send-notification", post(push::send_notification))
        .route(
            "/api/send-notification-to-all",
            post(push::send_notification_to_all),
        )
        .route("/service-worker.js", get(assets::service_worker))
        .route(
            "/static/push_subscribe.js",
            get(assets::push_subscribe_script),
        )
        .route("/static/sw_register.js", get(assets::sw_register_script))
        .route("/health", get(health))
        .with_state(state)
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::push::vapid::generate_vapid_credentials_with_rng;
    use axum::body::Body;
    use axum::body::to_bytes;
    use axum::http::Request;
    use axum::http::StatusCode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::Value as JsonValue;
    use serde_json::from_slice as json_from_slice;
    use tower::ServiceExt;

    fn test_state(config: config::AppConfig) -> state::AppState {
        state::AppState {
            config,
            store: store::SubscriptionStore::new(),
        }
    }

    fn vapid_app_config() -> config::AppConfig {
        let mut rng = StdRng::from_seed([11u8; 32]);
        let credentials =
            generate_vapid_credentials_with_rng(&mut rng).expect("credentials should generate");
        config::AppConfig {
            vapid_private_key: Some(credentials.private_key),
            vapid_public_key: Some(credentials.public_key),
            vapid_subject: Some("mailto:ops@example.com".to_string()),
            ..Default::default()
        }
    }

    fn subscription_body(endpoint: &str) -> Body {
        Body::from(format!(
            r#"{{"endpoint":"{endpoint}","expirationTime":null,"keys":{{"p256dh":"p256","auth":"auth"}}}}"#
        ))
    }

    fn json_post(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn app__should_return_ok_on_health_endpoint() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(body.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn save_subscription__should_store_record_and_return_created() {
        // Given
        let state = test_state(config::AppConfig::default());

        // When
        let response = app_with_state(state.clone())
            .oneshot(json_post(
                "/api/save-subscription",
                subscription_body("https://push.example/abc"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let payload: JsonValue = json_from_slice(&body).expect("parse json");
        assert_eq!(payload["message"], "Subscription saved");

        assert_eq!(state.store.len(), 1);
        assert!(state.store.get("https://push.example/abc").is_some());
    }

    #[tokio::test]
    async fn save_subscription__should_not_duplicate_same_endpoint() {
        // Given
        let state = test_state(config::AppConfig::default());
        let app = app_with_state(state.clone());

        // When
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(json_post(
                    "/api/save-subscription",
                    subscription_body("https://push.example/abc"),
                ))
                .await
                .expect("request failed");
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Then
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn remove_subscription__should_delete_stored_record() {
        // Given
        let state = test_state(config::AppConfig::default());
        let app = app_with_state(state.clone());
        app.clone()
            .oneshot(json_post(
                "/api/save-subscription",
                subscription_body("https://push.example/abc"),
            ))
            .await
            .expect("save request failed");
        assert_eq!(state.store.len(), 1);

        // When
        let response = app
            .oneshot(json_post(
                "/api/remove-subscription",
                subscription_body("https://push.example/abc"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let payload: JsonValue = json_from_slice(&body).expect("parse json");
        assert_eq!(payload["message"], "Subscription removed");
        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn remove_subscription__should_succeed_for_unknown_endpoint() {
        // Given
        let state = test_state(config::AppConfig::default());
        let app = app_with_state(state.clone());
        app.clone()
            .oneshot(json_post(
                "/api/save-subscription",
                subscription_body("https://push.example/abc"),
            ))
            .await
            .expect("save request failed");

        // When
        let response = app
            .oneshot(json_post(
                "/api/remove-subscription",
                subscription_body("https://push.example/never-saved"),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn push_public_key__should_return_unavailable_without_vapid() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/push/public-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let payload: JsonValue = json_from_slice(&body).expect("parse json");
        assert_eq!(payload["error"], "Push notifications are not configured.");
    }

    #[tokio::test]
    async fn push_public_key__should_return_configured_key() {
        // Given
        let app_config = vapid_app_config();
        let expected = app_config.vapid_public_key.clone().expect("public key");

        // When
        let response = app(app_config)
            .oneshot(
                Request::builder()
                    .uri("/api/push/public-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let payload: JsonValue = json_from_slice(&body).expect("parse json");
        assert_eq!(payload["publicKey"], expected.as_str());
    }

    #[tokio::test]
    async fn send_notification__should_return_unavailable_without_vapid() {
        // Given
        let app = app(config::AppConfig::default());
        let body = Body::from(
            r#"{"subscription":{"endpoint":"https://push.example/abc","keys":{"p256dh":"p256","auth":"auth"}},"title":"Hi"}"#,
        );

        // When
        let response = app
            .oneshot(json_post("/api/send-notification", body))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn send_notification_to_all__should_return_unavailable_without_vapid() {
        // Given
        let state = test_state(config::AppConfig::default());
        let app = app_with_state(state.clone());
        app.clone()
            .oneshot(json_post(
                "/api/save-subscription",
                subscription_body("https://push.example/abc"),
            ))
            .await
            .expect("save request failed");

        // When
        let response = app
            .oneshot(json_post(
                "/api/send-notification-to-all",
                Body::from(r#"{"title":"Hi"}"#),
            ))
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        // Nothing was attempted, so nothing was pruned.
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn subscribe_page__should_render_for_unconfigured_server() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body.contains("Pushbox"));
        assert!(body.contains("pushbox init"));
    }

    #[tokio::test]
    async fn service_worker__should_be_served_at_root_scope() {
        // Given
        let app = app(config::AppConfig::default());

        // When
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/service-worker.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request failed");

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .expect("content-type"),
            "application/javascript"
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body.contains("showNotification"));
        assert!(body.contains("notificationclick"));
    }
}
