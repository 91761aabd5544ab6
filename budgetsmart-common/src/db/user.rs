use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::user::{NewUser, User};
use crate::password_hasher;
use crate::request_io::InputUser;
use crate::schema::budgets as budget_fields;
use crate::schema::budgets::dsl::budgets;
use crate::schema::expenses as expense_fields;
use crate::schema::expenses::dsl::expenses;
use crate::schema::password_resets as password_reset_fields;
use crate::schema::password_resets::dsl::password_resets;
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn get_user_by_id(&mut self, user_id: Uuid) -> Result<User, DaoError> {
        Ok(users
            .find(user_id)
            .first::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_user_by_email(&mut self, user_email: &str) -> Result<User, DaoError> {
        Ok(users
            .filter(user_fields::email.eq(user_email.to_lowercase()))
            .first::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn create_user(
        &mut self,
        user_data: &InputUser,
        hash_params: &password_hasher::HashParams,
        hashing_key: &[u8],
    ) -> Result<User, DaoError> {
        let hashed_password =
            password_hasher::hash_password(&user_data.password, hash_params, hashing_key);
        let current_time = chrono::Utc::now().naive_utc();

        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: &user_data.username,
            email: &user_data.email.to_lowercase(),
            password_hash: &hashed_password,
            created_timestamp: current_time,
        };

        Ok(dsl::insert_into(users)
            .values(&new_user)
            .get_result::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn edit_profile(
        &mut self,
        user_id: Uuid,
        new_username: Option<&str>,
        new_email: Option<&str>,
    ) -> Result<User, DaoError> {
        let new_email = new_email.map(|e| e.to_lowercase());
        let mut db_connection = self.db_thread_pool.get()?;

        let user = db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                if let Some(username) = new_username {
                    let collision_count = users
                        .filter(user_fields::username.eq(username))
                        .filter(user_fields::id.ne(user_id))
                        .count()
                        .get_result::<i64>(conn)?;

                    if collision_count > 0 {
                        return Err(DaoError::AlreadyExists);
                    }
                }

                if let Some(email) = new_email.as_deref() {
                    let collision_count = users
                        .filter(user_fields::email.eq(email))
                        .filter(user_fields::id.ne(user_id))
                        .count()
                        .get_result::<i64>(conn)?;

                    if collision_count > 0 {
                        return Err(DaoError::AlreadyExists);
                    }
                }

                let user = match (new_username, new_email.as_deref()) {
                    (Some(username), Some(email)) => {
                        dsl::update(users.find(user_id))
                            .set((
                                user_fields::username.eq(username),
                                user_fields::email.eq(email),
                            ))
                            .get_result::<User>(conn)?
                    }
                    (Some(username), None) => dsl::update(users.find(user_id))
                        .set(user_fields::username.eq(username))
                        .get_result::<User>(conn)?,
                    (None, Some(email)) => dsl::update(users.find(user_id))
                        .set(user_fields::email.eq(email))
                        .get_result::<User>(conn)?,
                    (None, None) => users.find(user_id).first::<User>(conn)?,
                };

                Ok(user)
            })?;

        Ok(user)
    }

    pub fn change_password(
        &mut self,
        user_id: Uuid,
        new_password: &str,
        hash_params: &password_hasher::HashParams,
        hashing_key: &[u8],
    ) -> Result<(), DaoError> {
        let hashed_password =
            password_hasher::hash_password(new_password, hash_params, hashing_key);

        dsl::update(users.find(user_id))
            .set(user_fields::password_hash.eq(hashed_password))
            .execute(&mut self.db_thread_pool.get()?)?;

        Ok(())
    }

    // All of a user's data goes in one transaction; either the whole account
    // disappears or none of it does
    pub fn delete_user(&mut self, user_id: Uuid) -> Result<(), DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(expenses.filter(expense_fields::user_id.eq(user_id)))
                    .execute(conn)?;
                diesel::delete(budgets.filter(budget_fields::user_id.eq(user_id)))
                    .execute(conn)?;
                diesel::delete(
                    password_resets.filter(password_reset_fields::user_id.eq(user_id)),
                )
                .execute(conn)?;

                let deleted_user_count =
                    diesel::delete(users.find(user_id)).execute(conn)?;

                if deleted_user_count == 0 {
                    return Err(diesel::result::Error::NotFound);
                }

                Ok(())
            })?;

        Ok(())
    }
}
