use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/budgets")
            .route("", web::get().to(handlers::budget::get_all))
            .route("", web::post().to(handlers::budget::upsert))
            .route("/{budget_id}", web::put().to(handlers::budget::edit))
            .route("/{budget_id}", web::delete().to(handlers::budget::delete)),
    );
}
