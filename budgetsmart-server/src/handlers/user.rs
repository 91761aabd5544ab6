use actix_web::{web, HttpResponse};
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::password_hasher;
use budgetsmart_common::request_io::{
    CurrentAndNewPasswordPair, InputEditProfile, InputPasswordConfirmation, OutputMessage,
    OutputUser,
};
use budgetsmart_common::validators::{self, Validity};

use crate::env;
use crate::handlers::error::ServerError;
use crate::middleware::auth::AuthorizedUser;

pub async fn get_profile(authorized_user: AuthorizedUser) -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(OutputUser::from(authorized_user.0)))
}

pub async fn edit_profile(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    edit_data: web::Json<InputEditProfile>,
) -> Result<HttpResponse, ServerError> {
    if let Some(username) = edit_data.username.as_deref() {
        if let Validity::Invalid(msg) = validators::validate_username(username) {
            return Err(ServerError::InvalidFormat(Some(msg)));
        }
    }

    if let Some(email) = edit_data.email.as_deref() {
        if let Validity::Invalid(msg) = validators::validate_email_address(email) {
            return Err(ServerError::InvalidFormat(Some(msg)));
        }
    }

    if edit_data.username.is_none() && edit_data.email.is_none() {
        return Ok(HttpResponse::Ok().json(OutputUser::from(authorized_user.0)));
    }

    let user_id = authorized_user.0.id;

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.edit_profile(
            user_id,
            edit_data.0.username.as_deref(),
            edit_data.0.email.as_deref(),
        )
    })
    .await?
    {
        Ok(u) => u,
        Err(e) if e.is_unique_violation() => {
            return Err(ServerError::AlreadyExists(Some(String::from(
                "Username or email already taken",
            ))));
        }
        Err(e) if e.is_not_found() => {
            return Err(ServerError::NotFound(Some(String::from("User not found"))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to update profile",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(OutputUser::from(user)))
}

pub async fn change_password(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    password_pair: web::Json<CurrentAndNewPasswordPair>,
) -> Result<HttpResponse, ServerError> {
    if let Validity::Invalid(msg) = validators::validate_password(&password_pair.new_password) {
        return Err(ServerError::InvalidFormat(Some(msg)));
    }

    let user_id = authorized_user.0.id;
    let current_hash = authorized_user.0.password_hash;

    match web::block(move || {
        if !password_hasher::verify_hash(
            &password_pair.current_password,
            &current_hash,
            &env::CONF.keys.hashing_key,
        ) {
            return Ok(false);
        }

        let mut user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao
            .change_password(
                user_id,
                &password_pair.new_password,
                &env::CONF.hashing.hash_params(),
                &env::CONF.keys.hashing_key,
            )
            .map(|_| true)
    })
    .await?
    {
        Ok(true) => (),
        Ok(false) => {
            return Err(ServerError::UserUnauthorized(Some(String::from(
                "Current password is incorrect",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to change password",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new("Password changed successfully")))
}

pub async fn delete_account(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    confirmation: web::Json<InputPasswordConfirmation>,
) -> Result<HttpResponse, ServerError> {
    let user_id = authorized_user.0.id;
    let current_hash = authorized_user.0.password_hash;

    match web::block(move || {
        if !password_hasher::verify_hash(
            &confirmation.password,
            &current_hash,
            &env::CONF.keys.hashing_key,
        ) {
            return Ok(false);
        }

        let mut user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.delete_user(user_id).map(|_| true)
    })
    .await?
    {
        Ok(true) => (),
        Ok(false) => {
            return Err(ServerError::UserUnauthorized(Some(String::from(
                "Password is incorrect",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to delete account",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new("Account deleted successfully")))
}
