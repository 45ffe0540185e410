//! Shared utilities for integration tests.

use std::sync::Arc;

use app_env::config::{load_with_mode, AppConfig, RawEnv, RuntimeMode};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

/// Server secrets used across tests; none may ever reach a client.
pub const SECRETS: &[(&str, &str)] = &[
    ("BACKEND_SERVICE_ROLE_KEY", "svc_role_7f3a"),
    ("PAYMENTS_SECRET_KEY", "sk_test_51HxYz"),
    ("PAYMENTS_WEBHOOK_SECRET", "whsec_9c1d"),
    ("EMAIL_API_KEY", "re_4b2e"),
];

/// The smallest environment that loads.
pub fn minimal_env() -> RawEnv {
    [("BACKEND_URL", "https://x.test"), ("BACKEND_ANON_KEY", "abc")]
        .into_iter()
        .collect()
}

/// Every variable set, secrets included.
pub fn full_env() -> RawEnv {
    let mut env = minimal_env();
    env.set("APP_URL", "https://app.example.com");
    for (name, value) in SECRETS {
        env.set(*name, *value);
    }
    env
}

#[allow(dead_code)]
pub fn config(env: &RawEnv) -> Arc<AppConfig> {
    Arc::new(load_with_mode(env, RuntimeMode::Production).unwrap())
}

/// Send a GET through the router without a socket.
#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
