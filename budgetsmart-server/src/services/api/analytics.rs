use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics").route("/summary", web::get().to(handlers::analytics::summary)),
    );
}
