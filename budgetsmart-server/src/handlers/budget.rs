use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::request_io::{InputBudget, InputEditBudget, InputMonthYear, OutputMessage};
use chrono::Datelike;
use uuid::Uuid;

use crate::env;
use crate::handlers::error::ServerError;
use crate::middleware::auth::AuthorizedUser;

fn validate_month(month: i16) -> Result<(), ServerError> {
    if !(1..=12).contains(&month) {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Month must be between 1 and 12",
        ))));
    }

    Ok(())
}

fn validate_year(year: i32) -> Result<(), ServerError> {
    let bounds = &env::CONF.bounds;

    if year < bounds.min_budget_year || year > bounds.max_budget_year {
        return Err(ServerError::InvalidFormat(Some(format!(
            "Year must be between {} and {}",
            bounds.min_budget_year, bounds.max_budget_year,
        ))));
    }

    Ok(())
}

fn validate_amount(amount: &BigDecimal) -> Result<(), ServerError> {
    if *amount <= BigDecimal::from(0) {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Amount must be greater than 0",
        ))));
    }

    Ok(())
}

pub async fn get_all(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    filters: web::Query<InputMonthYear>,
) -> Result<HttpResponse, ServerError> {
    if let Some(month) = filters.month {
        validate_month(month)?;
    }

    let user_id = authorized_user.0.id;

    let budgets = match web::block(move || {
        let mut budget_dao = db::budget::Dao::new(&db_thread_pool);
        budget_dao.get_budgets(user_id, filters.month, filters.year)
    })
    .await?
    {
        Ok(b) => b,
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to get budgets",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(budgets))
}

pub async fn upsert(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    budget_data: web::Json<InputBudget>,
) -> Result<HttpResponse, ServerError> {
    let category = budget_data.category.trim().to_owned();

    if category.is_empty() {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Category is required",
        ))));
    }

    validate_amount(&budget_data.amount)?;

    let current_date = chrono::Utc::now().date_naive();
    let month = budget_data
        .month
        .unwrap_or_else(|| i16::try_from(current_date.month()).unwrap_or(1));
    let year = budget_data.year.unwrap_or_else(|| current_date.year());

    validate_month(month)?;
    validate_year(year)?;

    let user_id = authorized_user.0.id;

    let budget = match web::block(move || {
        let mut budget_dao = db::budget::Dao::new(&db_thread_pool);
        budget_dao.upsert_budget(user_id, &category, &budget_data.amount, month, year)
    })
    .await?
    {
        Ok(b) => b,
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to save budget",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(budget))
}

pub async fn edit(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    budget_id: web::Path<Uuid>,
    budget_data: web::Json<InputEditBudget>,
) -> Result<HttpResponse, ServerError> {
    validate_amount(&budget_data.amount)?;

    let user_id = authorized_user.0.id;
    let budget_id = budget_id.into_inner();

    let budget = match web::block(move || {
        let mut budget_dao = db::budget::Dao::new(&db_thread_pool);
        budget_dao.update_budget_amount(budget_id, user_id, &budget_data.amount)
    })
    .await?
    {
        Ok(b) => b,
        Err(e) if e.is_not_found() => {
            return Err(ServerError::NotFound(Some(String::from(
                "Budget not found",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to update budget",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(budget))
}

pub async fn delete(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    budget_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServerError> {
    let user_id = authorized_user.0.id;
    let budget_id = budget_id.into_inner();

    match web::block(move || {
        let mut budget_dao = db::budget::Dao::new(&db_thread_pool);
        budget_dao.delete_budget(budget_id, user_id)
    })
    .await?
    {
        Ok(()) => (),
        Err(e) if e.is_not_found() => {
            return Err(ServerError::NotFound(Some(String::from(
                "Budget not found",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to delete budget",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new("Budget deleted successfully")))
}
