use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::models::expense::ExpenseChangeset;
use budgetsmart_common::request_io::{
    ExpenseFilters, InputEditExpense, InputExpense, OutputMessage,
};
use uuid::Uuid;

use crate::handlers::error::ServerError;
use crate::middleware::auth::AuthorizedUser;

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
    filters: web::Query<ExpenseFilters>,
) -> Result<HttpResponse, ServerError> {
    if let Some(limit) = filters.limit {
        if limit <= 0 {
            return Err(ServerError::InvalidFormat(Some(String::from(
                "Limit must be greater than 0",
            ))));
        }
    }

    let user_id = authorized_user.0.id;

    let expenses = match web::block(move || {
        let mut expense_dao = db::expense::Dao::new(&db_thread_pool);
        expense_dao.get_expenses(user_id, &filters.0)
    })
    .await?
    {
        Ok(e) => e,
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to get expenses",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(expenses))
}

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    expense_data: web::Json<InputExpense>,
) -> Result<HttpResponse, ServerError> {
    let description = expense_data.description.trim().to_owned();
    let category = expense_data.category.trim().to_owned();

    if description.is_empty() {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Description is required",
        ))));
    }

    if category.is_empty() {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Category is required",
        ))));
    }

    validate_amount(&expense_data.amount)?;

    let date = expense_data
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let user_id = authorized_user.0.id;

    let expense = match web::block(move || {
        let mut expense_dao = db::expense::Dao::new(&db_thread_pool);
        expense_dao.create_expense(user_id, &description, &expense_data.amount, &category, date)
    })
    .await?
    {
        Ok(e) => e,
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to create expense",
            ))));
        }
    };

    Ok(HttpResponse::Created().json(expense))
}

pub async fn edit(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    expense_id: web::Path<Uuid>,
    expense_data: web::Json<InputEditExpense>,
) -> Result<HttpResponse, ServerError> {
    if let Some(description) = expense_data.description.as_deref() {
        if description.trim().is_empty() {
            return Err(ServerError::InvalidFormat(Some(String::from(
                "Description cannot be empty",
            ))));
        }
    }

    if let Some(category) = expense_data.category.as_deref() {
        if category.trim().is_empty() {
            return Err(ServerError::InvalidFormat(Some(String::from(
                "Category cannot be empty",
            ))));
        }
    }

    if let Some(amount) = &expense_data.amount {
        validate_amount(amount)?;
    }

    if expense_data.description.is_none()
        && expense_data.amount.is_none()
        && expense_data.category.is_none()
        && expense_data.date.is_none()
    {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "No fields provided",
        ))));
    }

    let user_id = authorized_user.0.id;
    let expense_id = expense_id.into_inner();

    let expense = match web::block(move || {
        let changes = ExpenseChangeset {
            description: expense_data.0.description,
            amount: expense_data.0.amount,
            category: expense_data.0.category,
            date: expense_data.0.date,
        };

        let mut expense_dao = db::expense::Dao::new(&db_thread_pool);
        expense_dao.update_expense(expense_id, user_id, changes)
    })
    .await?
    {
        Ok(e) => e,
        Err(e) if e.is_not_found() => {
            return Err(ServerError::NotFound(Some(String::from(
                "Expense not found",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to update expense",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(expense))
}

pub async fn delete(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    expense_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServerError> {
    let user_id = authorized_user.0.id;
    let expense_id = expense_id.into_inner();

    match web::block(move || {
        let mut expense_dao = db::expense::Dao::new(&db_thread_pool);
        expense_dao.delete_expense(expense_id, user_id)
    })
    .await?
    {
        Ok(()) => (),
        Err(e) if e.is_not_found() => {
            return Err(ServerError::NotFound(Some(String::from(
                "Expense not found",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to delete expense",
            ))));
        }
    }

    Ok(HttpResponse::Ok().json(OutputMessage::new("Expense deleted successfully")))
}
