use base64::engine::general_purpose::URL_SAFE_NO_PAD as b64_url;
use base64::Engine;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::password_reset::{NewPasswordReset, PasswordReset};
use crate::password_hasher;
use crate::schema::password_resets as password_reset_fields;
use crate::schema::password_resets::dsl::password_resets;
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

const RESET_TOKEN_LENGTH_BYTES: usize = 32;

pub fn generate_reset_token() -> String {
    let mut token_bytes = [0u8; RESET_TOKEN_LENGTH_BYTES];
    OsRng.fill_bytes(&mut token_bytes);

    b64_url.encode(token_bytes)
}

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    // Issuing a new token invalidates any outstanding one for the user
    pub fn replace_password_reset_token(
        &mut self,
        user_id: Uuid,
        token: &str,
        token_lifetime: Duration,
    ) -> Result<PasswordReset, DaoError> {
        let current_time = chrono::Utc::now().naive_utc();
        let token_lifetime =
            chrono::Duration::from_std(token_lifetime).map_err(|_| DaoError::OutOfRange)?;

        let new_reset = NewPasswordReset {
            id: Uuid::new_v4(),
            user_id,
            token,
            expires_at: current_time + token_lifetime,
            created_timestamp: current_time,
        };

        let mut db_connection = self.db_thread_pool.get()?;

        let reset = db_connection
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(
                    password_resets.filter(password_reset_fields::user_id.eq(user_id)),
                )
                .execute(conn)?;

                dsl::insert_into(password_resets)
                    .values(&new_reset)
                    .get_result::<PasswordReset>(conn)
            })?;

        Ok(reset)
    }

    // The password update and the token deletion commit together; a redeemed
    // token can never be replayed
    pub fn redeem_password_reset_token(
        &mut self,
        token: &str,
        new_password: &str,
        hash_params: &password_hasher::HashParams,
        hashing_key: &[u8],
    ) -> Result<(), DaoError> {
        let hashed_password =
            password_hasher::hash_password(new_password, hash_params, hashing_key);
        let current_time = chrono::Utc::now().naive_utc();

        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                let reset = password_resets
                    .filter(password_reset_fields::token.eq(token))
                    .filter(password_reset_fields::expires_at.gt(current_time))
                    .first::<PasswordReset>(conn)?;

                dsl::update(users.find(reset.user_id))
                    .set(user_fields::password_hash.eq(&hashed_password))
                    .execute(conn)?;

                diesel::delete(password_resets.find(reset.id)).execute(conn)?;

                Ok(())
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reset_token() {
        let token = generate_reset_token();

        // 32 bytes of entropy, base64url without padding
        assert_eq!(token.len(), 43);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));

        assert_ne!(token, generate_reset_token());
    }
}
