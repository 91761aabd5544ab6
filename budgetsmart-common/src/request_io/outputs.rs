use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_timestamp: NaiveDateTime,
}

impl From<User> for OutputUser {
    fn from(user: User) -> Self {
        OutputUser {
            id: user.id,
            username: user.username,
            email: user.email,
            created_timestamp: user.created_timestamp,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSignIn {
    pub token: String,
    pub user: OutputUser,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputMessage {
    pub message: String,
}

impl OutputMessage {
    pub fn new(message: &str) -> Self {
        OutputMessage {
            message: String::from(message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputCategorySpending {
    pub category: String,
    pub budget: BigDecimal,
    pub spent: BigDecimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputMonthlySummary {
    pub month: i16,
    pub year: i32,
    pub total_budget: BigDecimal,
    pub total_spent: BigDecimal,
    pub remaining: BigDecimal,
    pub category_breakdown: Vec<OutputCategorySpending>,
}
