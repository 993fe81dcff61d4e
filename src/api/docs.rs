use axum::{http::header, response::IntoResponse};

const OPENAPI_SPEC: &str = include_str!("../../openapi.yaml");

/// Serves the bundled `OpenAPI` document with the running crate version filled in.
pub async fn openapi_yaml() -> impl IntoResponse {
    let body = OPENAPI_SPEC.replace("version: 0.0.0", &format!("version: {}", env!("CARGO_PKG_VERSION")));

    ([(header::CONTENT_TYPE, "application/yaml")], body)
}
