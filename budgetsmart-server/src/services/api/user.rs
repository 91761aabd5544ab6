use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/profile", web::get().to(handlers::user::get_profile))
            .route("/profile", web::put().to(handlers::user::edit_profile))
            .route(
                "/change-password",
                web::post().to(handlers::user::change_password),
            )
            .route(
                "/delete-account",
                web::delete().to(handlers::user::delete_account),
            ),
    );
}
