use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validators;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialPair {
    pub email: String,
    pub password: String,
}

impl CredentialPair {
    pub fn validate_email_address(&self) -> validators::Validity {
        validators::validate_email_address(&self.email)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl InputUser {
    pub fn validate_username(&self) -> validators::Validity {
        validators::validate_username(&self.username)
    }

    pub fn validate_email_address(&self) -> validators::Validity {
        validators::validate_email_address(&self.email)
    }

    pub fn validate_password(&self) -> validators::Validity {
        validators::validate_password(&self.password)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEmail {
    pub email: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputResetPassword {
    pub token: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEditProfile {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CurrentAndNewPasswordPair {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputPasswordConfirmation {
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputBudget {
    pub category: String,
    pub amount: BigDecimal,
    pub month: Option<i16>,
    pub year: Option<i32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEditBudget {
    pub amount: BigDecimal,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputExpense {
    pub description: String,
    pub amount: BigDecimal,
    pub category: String,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEditExpense {
    pub description: Option<String>,
    pub amount: Option<BigDecimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ExpenseFilters {
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputMonthYear {
    pub month: Option<i16>,
    pub year: Option<i32>,
}
