use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/expenses")
            .route("", web::get().to(handlers::expense::get_all))
            .route("", web::post().to(handlers::expense::create))
            .route("/{expense_id}", web::put().to(handlers::expense::edit))
            .route(
                "/{expense_id}",
                web::delete().to(handlers::expense::delete),
            ),
    );
}
