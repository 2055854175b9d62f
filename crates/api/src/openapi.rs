// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` documentation module
//!
//! The [`ApiDoc`] document plus the endpoints serving it as JSON and through
//! Swagger UI.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers::{self, ErrorResponse, PredictRequest, PredictionResponse},
    state::{HealthCheck, HealthStatus, ModelInfo},
};

const SWAGGER_UI_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sentiment API Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-doc/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                tryItOutEnabled: true,
            });
        };
    </script>
</body>
</html>
"#;

/// `OpenAPI` document for every public endpoint
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Sentiment API",
        description = "Classifies the sentiment of short texts with a pretrained transformer model."
    ),
    paths(
        handlers::index_handler,
        handlers::health_handler,
        handlers::predict_handler,
    ),
    components(schemas(
        PredictRequest,
        PredictionResponse,
        ErrorResponse,
        HealthCheck,
        HealthStatus,
        ModelInfo,
        Environment,
    )),
    tags(
        (name = "sentiment", description = "Sentiment prediction"),
        (name = "health", description = "Readiness and health reporting")
    )
)]
pub struct ApiDoc;

/// `OpenAPI` specification endpoint
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Swagger UI endpoint
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_endpoint() {
        let doc = ApiDoc::openapi();

        for path in ["/", "/health", "/predict"] {
            assert!(doc.paths.paths.contains_key(path), "{path} is undocumented");
        }

        let schemas = doc.components.expect("components are generated").schemas;
        assert!(schemas.contains_key("PredictionResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
    }

    #[tokio::test]
    async fn document_names_the_service() {
        let Json(spec) = openapi_spec().await;
        assert_eq!(spec.info.title, "Sentiment API");
    }

    #[tokio::test]
    async fn swagger_ui_loads_local_document() {
        let Html(page) = swagger_ui().await;
        assert!(page.contains("/api-doc/openapi.json"));
    }
}
