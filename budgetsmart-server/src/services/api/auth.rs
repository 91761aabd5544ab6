use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(handlers::auth::register))
            .route("/login", web::post().to(handlers::auth::login))
            .route(
                "/forgot-password",
                web::post().to(handlers::auth::forgot_password),
            )
            .route(
                "/reset-password",
                web::post().to(handlers::auth::reset_password),
            ),
    );
}
