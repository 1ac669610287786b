//! HTTP handlers and route configuration.

mod assistant;
mod auth;
mod dashboard;
mod health;
mod post_form;
mod posts;
mod tags;


use actix_web::web;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes. `limiter` guards the auth and
/// assistant scopes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: RateLimitMiddleware) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .wrap(limiter.clone())
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // `/posts/user` must be registered before `/posts/{id}`.
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/user", web::get().to(posts::by_user))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::get().to(tags::list))
                    .route("", web::post().to(tags::ensure)),
            )
            .route("/dashboard/stats", web::get().to(dashboard::stats))
            .service(
                web::scope("/ai")
                    .wrap(limiter)
                    .route("/generate", web::post().to(assistant::generate))
                    .route("/chat", web::post().to(assistant::chat)),
            ),
    );
}
