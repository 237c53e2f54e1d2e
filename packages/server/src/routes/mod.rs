use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::registration::create_registration))
        .route(
            "/registrations",
            get(handlers::registration::list_registrations),
        )
        .route(
            "/registrations/{id}",
            put(handlers::registration::update_registration)
                .delete(handlers::registration::delete_registration),
        )
        .route("/uploads/{file_name}", get(handlers::uploads::serve_upload))
        .layer(handlers::registration::upload_body_limit())
}
