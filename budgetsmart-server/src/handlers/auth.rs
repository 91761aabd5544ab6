use actix_web::{web, HttpResponse};
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::models::user::User;
use budgetsmart_common::password_hasher;
use budgetsmart_common::request_io::{
    CredentialPair, InputEmail, InputResetPassword, InputUser, OutputMessage, OutputSignIn,
    OutputUser,
};
use budgetsmart_common::auth_token;
use budgetsmart_common::validators::{self, Validity};

use crate::env;
use crate::handlers::error::ServerError;

pub async fn register(
    db_thread_pool: web::Data<DbThreadPool>,
    user_data: web::Json<InputUser>,
) -> Result<HttpResponse, ServerError> {
    if let Validity::Invalid(msg) = user_data.validate_username() {
        return Err(ServerError::InvalidFormat(Some(msg)));
    }

    if let Validity::Invalid(msg) = user_data.validate_email_address() {
        return Err(ServerError::InvalidFormat(Some(msg)));
    }

    if let Validity::Invalid(msg) = user_data.validate_password() {
        return Err(ServerError::InvalidFormat(Some(msg)));
    }

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.create_user(
            &user_data.0,
            &env::CONF.hashing.hash_params(),
            &env::CONF.keys.hashing_key,
        )
    })
    .await?
    {
        Ok(u) => u,
        Err(e) if e.is_unique_violation() => {
            return Err(ServerError::AlreadyExists(Some(String::from(
                "A user with this username or email already exists",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to create user",
            ))));
        }
    };

    Ok(HttpResponse::Created().json(OutputUser::from(user)))
}

pub async fn login(
    db_thread_pool: web::Data<DbThreadPool>,
    credentials: web::Json<CredentialPair>,
) -> Result<HttpResponse, ServerError> {
    const INVALID_CREDENTIALS_MSG: &str = "Incorrect email or password";

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&db_thread_pool);

        let user = match user_dao.get_user_by_email(&credentials.email) {
            Ok(u) => u,
            Err(e) if e.is_not_found() => {
                // Hash the provided password anyway so response timing doesn't
                // reveal whether the email is registered
                password_hasher::hash_password(
                    &credentials.password,
                    &env::CONF.hashing.hash_params(),
                    &env::CONF.keys.hashing_key,
                );

                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if password_hasher::verify_hash(
            &credentials.password,
            &user.password_hash,
            &env::CONF.keys.hashing_key,
        ) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    })
    .await?
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            return Err(ServerError::UserUnauthorized(Some(String::from(
                INVALID_CREDENTIALS_MSG,
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to verify credentials",
            ))));
        }
    };

    let token = match auth_token::generate_access_token(
        user.id,
        env::CONF.lifetimes.access_token_lifetime,
        &env::CONF.keys.token_signing_key,
    ) {
        Ok(t) => t,
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::InternalError(Some(String::from(
                "Failed to generate access token",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(OutputSignIn {
        token,
        user: OutputUser::from(user),
    }))
}

pub async fn forgot_password(
    db_thread_pool: web::Data<DbThreadPool>,
    email: web::Json<InputEmail>,
) -> Result<HttpResponse, ServerError> {
    // The response is identical whether or not the email is registered
    const RESET_REQUESTED_MSG: &str = "If the email exists, reset instructions have been sent";

    match web::block(move || {
        let mut user_dao = db::user::Dao::new(&db_thread_pool);

        let user: User = match user_dao.get_user_by_email(&email.email) {
            Ok(u) => u,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let token = db::auth::generate_reset_token();

        let mut auth_dao = db::auth::Dao::new(&db_thread_pool);
        auth_dao
            .replace_password_reset_token(
                user.id,
                &token,
                env::CONF.lifetimes.password_reset_token_lifetime,
            )
            .map(|_| Some(user.id))
    })
    .await?
    {
        Ok(Some(user_id)) => {
            log::info!("Issued a password reset token for user {user_id}");
        }
        Ok(None) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to issue password reset token",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new(RESET_REQUESTED_MSG)))
}

pub async fn reset_password(
    db_thread_pool: web::Data<DbThreadPool>,
    reset_data: web::Json<InputResetPassword>,
) -> Result<HttpResponse, ServerError> {
    if let Validity::Invalid(msg) = validators::validate_password(&reset_data.password) {
        return Err(ServerError::InvalidFormat(Some(msg)));
    }

    match web::block(move || {
        let mut auth_dao = db::auth::Dao::new(&db_thread_pool);
        auth_dao.redeem_password_reset_token(
            &reset_data.token,
            &reset_data.password,
            &env::CONF.hashing.hash_params(),
            &env::CONF.keys.hashing_key,
        )
    })
    .await?
    {
        Ok(()) => (),
        Err(e) if e.is_not_found() => {
            return Err(ServerError::InputRejected(Some(String::from(
                "Invalid or expired reset token",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to reset password",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new("Password reset successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::web::Data;
    use actix_web::{http, test, App};
    use budgetsmart_common::models::password_reset::PasswordReset;
    use budgetsmart_common::schema::password_resets::dsl::password_resets;
    use diesel::prelude::*;
    use rand::prelude::*;

    use crate::services;

    fn gen_test_user() -> InputUser {
        let user_number = rand::thread_rng().gen_range(10_000_000..100_000_000);
        InputUser {
            username: format!("test_user{}", user_number),
            email: format!("test_user{}@test.com", user_number),
            password: String::from("OAgZbc6d&ARg*Wq#NPe3"),
        }
    }

    #[actix_rt::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_register_and_login() {
        let db_thread_pool = env::testing::DB_THREAD_POOL.clone();

        let app = test::init_service(
            App::new()
                .app_data(Data::new(db_thread_pool.clone()))
                .configure(services::api::configure),
        )
        .await;

        let new_user = gen_test_user();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&new_user)
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::CREATED);

        let created_user: OutputUser = test::read_body_json(res).await;
        assert_eq!(created_user.username, new_user.username);
        assert_eq!(created_user.email, new_user.email.to_lowercase());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(CredentialPair {
                email: new_user.email.clone(),
                password: new_user.password.clone(),
            })
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);

        let signin: OutputSignIn = test::read_body_json(res).await;
        assert!(!signin.token.is_empty());
        assert_eq!(signin.user.id, created_user.id);

        let claims = auth_token::validate_access_token(
            &signin.token,
            &env::CONF.keys.token_signing_key,
        )
        .unwrap();
        assert_eq!(claims.uid, created_user.id);
    }

    #[actix_rt::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_register_rejects_duplicate_email_case_insensitively() {
        let db_thread_pool = env::testing::DB_THREAD_POOL.clone();

        let app = test::init_service(
            App::new()
                .app_data(Data::new(db_thread_pool.clone()))
                .configure(services::api::configure),
        )
        .await;

        let new_user = gen_test_user();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&new_user)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::CREATED);

        let mut duplicate = gen_test_user();
        duplicate.email = new_user.email.to_uppercase();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&duplicate)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_login_rejects_bad_credentials_generically() {
        let db_thread_pool = env::testing::DB_THREAD_POOL.clone();

        let app = test::init_service(
            App::new()
                .app_data(Data::new(db_thread_pool.clone()))
                .configure(services::api::configure),
        )
        .await;

        let new_user = gen_test_user();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&new_user)
            .to_request();
        test::call_service(&app, req).await;

        // Wrong password
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(CredentialPair {
                email: new_user.email.clone(),
                password: String::from("not-the-password"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
        let wrong_password_body = test::read_body(res).await;

        // Unknown email
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(CredentialPair {
                email: String::from("nobody_here@test.com"),
                password: String::from("not-the-password"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
        let unknown_email_body = test::read_body(res).await;

        assert_eq!(wrong_password_body, unknown_email_body);
    }

    #[actix_rt::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_reset_token_is_single_use() {
        let db_thread_pool = env::testing::DB_THREAD_POOL.clone();

        let app = test::init_service(
            App::new()
                .app_data(Data::new(db_thread_pool.clone()))
                .configure(services::api::configure),
        )
        .await;

        let new_user = gen_test_user();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&new_user)
            .to_request();
        let res = test::call_service(&app, req).await;
        let created_user: OutputUser = test::read_body_json(res).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(InputEmail {
                email: new_user.email.clone(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);

        // The token is only ever persisted, so read it from the table
        let reset = password_resets
            .filter(
                budgetsmart_common::schema::password_resets::user_id.eq(created_user.id),
            )
            .first::<PasswordReset>(&mut db_thread_pool.get().unwrap())
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/auth/reset-password")
            .set_json(InputResetPassword {
                token: reset.token.clone(),
                password: String::from("aNewPassword42!"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);

        // Replay must fail
        let req = test::TestRequest::post()
            .uri("/api/auth/reset-password")
            .set_json(InputResetPassword {
                token: reset.token,
                password: String::from("anotherNewPassword42!"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

        // The new password works; the old one doesn't
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(CredentialPair {
                email: new_user.email.clone(),
                password: String::from("aNewPassword42!"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(CredentialPair {
                email: new_user.email,
                password: new_user.password,
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    async fn test_register_input_validation() {
        let short_username = InputUser {
            username: String::from("ab"),
            email: String::from("test@example.com"),
            password: String::from("secret1"),
        };
        let bad_email = InputUser {
            username: String::from("test_user"),
            email: String::from("not-an-email"),
            password: String::from("secret1"),
        };
        let short_password = InputUser {
            username: String::from("test_user"),
            email: String::from("test@example.com"),
            password: String::from("short"),
        };

        assert!(!short_username.validate_username().is_valid());
        assert!(!bad_email.validate_email_address().is_valid());
        assert!(!short_password.validate_password().is_valid());
    }
}
