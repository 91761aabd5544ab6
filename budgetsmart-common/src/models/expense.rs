use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::expenses;

#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, Associations, Identifiable, Queryable,
)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = expenses)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: BigDecimal,
    pub category: String,
    pub date: NaiveDate,
    pub created_timestamp: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = expenses)]
pub struct NewExpense<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: &'a str,
    pub amount: &'a BigDecimal,
    pub category: &'a str,
    pub date: NaiveDate,
    pub created_timestamp: NaiveDateTime,
}

// Fields left as None are omitted from the UPDATE.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = expenses)]
pub struct ExpenseChangeset {
    pub description: Option<String>,
    pub amount: Option<BigDecimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}
