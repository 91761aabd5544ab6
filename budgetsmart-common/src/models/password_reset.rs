use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::password_resets;

#[derive(Clone, Debug, Associations, Identifiable, Queryable)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = password_resets)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub created_timestamp: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = password_resets)]
pub struct NewPasswordReset<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: &'a str,
    pub expires_at: NaiveDateTime,
    pub created_timestamp: NaiveDateTime,
}
