use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{web, FromRequest, HttpRequest};
use budgetsmart_common::auth_token::{self, TokenClaims, TokenError};
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::models::user::User;
use futures::future::LocalBoxFuture;

use crate::env;
use crate::handlers::error::ServerError;

// The authenticated caller, resolved from the bearer token. Resolving the
// user row (rather than trusting the claims alone) means tokens for deleted
// accounts stop authenticating immediately.
#[derive(Debug)]
pub struct AuthorizedUser(pub User);

// Signature/expiry checks happen before any database access so garbage
// requests stay cheap
fn claims_from_request(req: &HttpRequest) -> Result<TokenClaims, TokenError> {
    let auth_header = match req.headers().get("Authorization") {
        Some(header) => header,
        None => return Err(TokenError::TokenMissing),
    };

    let mut header_parts_iter = auth_header
        .to_str()
        .map_err(|_| TokenError::TokenInvalid)?
        .split_ascii_whitespace();

    match header_parts_iter.next() {
        Some(bearer_keyword) => {
            if !bearer_keyword.eq_ignore_ascii_case("bearer") {
                return Err(TokenError::TokenInvalid);
            }
        }
        None => return Err(TokenError::TokenMissing),
    }

    let token = match header_parts_iter.next() {
        Some(token) => token,
        None => return Err(TokenError::TokenMissing),
    };

    auth_token::validate_access_token(token, &env::CONF.keys.token_signing_key)
}

impl FromRequest for AuthorizedUser {
    type Error = ServerError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims_result = claims_from_request(req);
        let db_thread_pool = req.app_data::<Data<DbThreadPool>>().cloned();

        Box::pin(async move {
            let claims = claims_result.map_err(|e| match e {
                TokenError::TokenMissing => {
                    ServerError::UserUnauthorized(Some(String::from("No token provided")))
                }
                TokenError::TokenExpired => {
                    ServerError::UserUnauthorized(Some(String::from("Token has expired")))
                }
                _ => ServerError::UserUnauthorized(Some(String::from("Token is invalid"))),
            })?;

            let db_thread_pool = db_thread_pool.ok_or_else(|| {
                ServerError::InternalError(Some(String::from("DB thread pool was not configured")))
            })?;

            let user = match web::block(move || {
                let mut user_dao = db::user::Dao::new(&db_thread_pool);
                user_dao.get_user_by_id(claims.uid)
            })
            .await?
            {
                Ok(u) => u,
                Err(e) if e.is_not_found() => {
                    return Err(ServerError::UserUnauthorized(Some(String::from(
                        "Token is invalid",
                    ))));
                }
                Err(e) => {
                    log::error!("{e}");
                    return Err(ServerError::DatabaseTransactionError(Some(String::from(
                        "Failed to authenticate user",
                    ))));
                }
            };

            Ok(AuthorizedUser(user))
        })
    }
}
