//! HTTP handlers and route configuration.

mod health;
mod notes;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Malformed JSON bodies get the same problem details as other bad requests
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/notes").route("/can-update", web::post().to(notes::can_update_note)),
            ),
    );
}
