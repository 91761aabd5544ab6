use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::budgets;

#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, Associations, Identifiable, Queryable,
)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = budgets)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: BigDecimal,
    pub month: i16,
    pub year: i32,
    pub modified_timestamp: NaiveDateTime,
    pub created_timestamp: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = budgets)]
pub struct NewBudget<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: &'a str,
    pub amount: &'a BigDecimal,
    pub month: i16,
    pub year: i32,
    pub modified_timestamp: NaiveDateTime,
    pub created_timestamp: NaiveDateTime,
}
