use actix_web::web;

mod analytics;
mod auth;
mod budget;
mod expense;
mod user;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health::heartbeat))
            .configure(auth::configure)
            .configure(user::configure)
            .configure(budget::configure)
            .configure(expense::configure)
            .configure(analytics::configure),
    );
}
