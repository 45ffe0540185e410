use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::config::{PublicConfig, RuntimeMode};
use crate::http::server::AppState;

/// Global the browser script assigns to.
pub const ENV_GLOBAL: &str = "window.__PUBLIC_ENV__";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub mode: RuntimeMode,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode,
    })
}

pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.public.as_ref().clone())
}

pub async fn env_script(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        render_env_script(&state.public),
    )
}

/// Render the public configuration as a script assignment.
pub fn render_env_script(public: &PublicConfig) -> String {
    let json = serde_json::to_string(public).unwrap_or_else(|_| "{}".to_string());
    // Keeps the payload inert if it is ever inlined into a <script> tag.
    let json = json.replace('<', "\\u003c");
    format!("{} = {};\n", ENV_GLOBAL, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidUrl;

    #[test]
    fn test_render_env_script() {
        let public = PublicConfig {
            app_url: ValidUrl::parse("http://localhost:3000").unwrap(),
            backend_url: ValidUrl::parse("https://x.test").unwrap(),
            backend_anon_key: "a</script>b".into(),
        };

        let script = render_env_script(&public);
        assert!(script.starts_with("window.__PUBLIC_ENV__ = {"));
        assert!(script.ends_with("};\n"));
        assert!(script.contains("\"BACKEND_URL\":\"https://x.test\""));
        assert!(!script.contains("</script>"));
        assert!(script.contains("a\\u003c/script>b"));
    }
}
