pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Regdesk Registration API",
        version = "1.0.0",
        description = "API for the Regdesk registration management tool"
    ),
    paths(
        handlers::registration::create_registration,
        handlers::registration::list_registrations,
        handlers::registration::update_registration,
        handlers::registration::delete_registration,
        handlers::uploads::serve_upload,
    ),
    components(schemas(
        common::registration::RegistrationRecord,
        common::registration::Gender,
        models::registration::MessageResponse,
        error::ErrorBody,
        error::FailureBody,
    )),
    tags(
        (name = "Registrations", description = "Registration CRUD operations"),
        (name = "Uploads", description = "Stored document retrieval"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    routes::routes()
        .with_state(state)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
