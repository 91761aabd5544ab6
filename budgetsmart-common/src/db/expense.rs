use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::expense::{Expense, ExpenseChangeset, NewExpense};
use crate::request_io::ExpenseFilters;
use crate::schema::expenses as expense_fields;
use crate::schema::expenses::dsl::expenses;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    // Filters are conjunctive; results are newest-first
    pub fn get_expenses(
        &mut self,
        user_id: Uuid,
        filters: &ExpenseFilters,
    ) -> Result<Vec<Expense>, DaoError> {
        let mut query = expenses
            .filter(expense_fields::user_id.eq(user_id))
            .into_boxed();

        if let Some(category) = &filters.category {
            query = query.filter(expense_fields::category.eq(category.clone()));
        }

        if let Some(start_date) = filters.start_date {
            query = query.filter(expense_fields::date.ge(start_date));
        }

        if let Some(end_date) = filters.end_date {
            query = query.filter(expense_fields::date.le(end_date));
        }

        if let Some(limit) = filters.limit {
            query = query.limit(limit);
        }

        Ok(query
            .order((
                expense_fields::date.desc(),
                expense_fields::created_timestamp.desc(),
            ))
            .load::<Expense>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn create_expense(
        &mut self,
        user_id: Uuid,
        description: &str,
        amount: &BigDecimal,
        category: &str,
        date: NaiveDate,
    ) -> Result<Expense, DaoError> {
        let new_expense = NewExpense {
            id: Uuid::new_v4(),
            user_id,
            description,
            amount,
            category,
            date,
            created_timestamp: chrono::Utc::now().naive_utc(),
        };

        Ok(dsl::insert_into(expenses)
            .values(&new_expense)
            .get_result::<Expense>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_expense(
        &mut self,
        expense_id: Uuid,
        user_id: Uuid,
        changes: ExpenseChangeset,
    ) -> Result<Expense, DaoError> {
        Ok(dsl::update(
            expenses
                .find(expense_id)
                .filter(expense_fields::user_id.eq(user_id)),
        )
        .set(changes)
        .get_result::<Expense>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn delete_expense(&mut self, expense_id: Uuid, user_id: Uuid) -> Result<(), DaoError> {
        let deleted_count = diesel::delete(
            expenses
                .find(expense_id)
                .filter(expense_fields::user_id.eq(user_id)),
        )
        .execute(&mut self.db_thread_pool.get()?)?;

        if deleted_count == 0 {
            return Err(diesel::result::Error::NotFound.into());
        }

        Ok(())
    }
}
