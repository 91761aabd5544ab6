use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::budget::{Budget, NewBudget};
use crate::request_io::{OutputCategorySpending, OutputMonthlySummary};
use crate::schema::budgets as budget_fields;
use crate::schema::budgets::dsl::budgets;
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

    pub fn get_budgets(
        &mut self,
        user_id: Uuid,
        month: Option<i16>,
        year: Option<i32>,
    ) -> Result<Vec<Budget>, DaoError> {
        let mut query = budgets
            .filter(budget_fields::user_id.eq(user_id))
            .into_boxed();

        if let Some(month) = month {
            query = query.filter(budget_fields::month.eq(month));
        }

        if let Some(year) = year {
            query = query.filter(budget_fields::year.eq(year));
        }

        Ok(query
            .order((
                budget_fields::year.desc(),
                budget_fields::month.desc(),
                budget_fields::category.asc(),
            ))
            .load::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    // A second submission for the same (user, category, month, year) must
    // overwrite the amount, not create a duplicate row. The uniqueness
    // constraint plus ON CONFLICT makes the upsert a single atomic statement
    // even under concurrent callers.
    pub fn upsert_budget(
        &mut self,
        user_id: Uuid,
        category: &str,
        amount: &BigDecimal,
        month: i16,
        year: i32,
    ) -> Result<Budget, DaoError> {
        let current_time = chrono::Utc::now().naive_utc();

        let new_budget = NewBudget {
            id: Uuid::new_v4(),
            user_id,
            category,
            amount,
            month,
            year,
            modified_timestamp: current_time,
            created_timestamp: current_time,
        };

        Ok(dsl::insert_into(budgets)
            .values(&new_budget)
            .on_conflict((
                budget_fields::user_id,
                budget_fields::category,
                budget_fields::month,
                budget_fields::year,
            ))
            .do_update()
            .set((
                budget_fields::amount.eq(amount),
                budget_fields::modified_timestamp.eq(current_time),
            ))
            .get_result::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_budget_amount(
        &mut self,
        budget_id: Uuid,
        user_id: Uuid,
        amount: &BigDecimal,
    ) -> Result<Budget, DaoError> {
        Ok(dsl::update(
            budgets
                .find(budget_id)
                .filter(budget_fields::user_id.eq(user_id)),
        )
        .set((
            budget_fields::amount.eq(amount),
            budget_fields::modified_timestamp.eq(chrono::Utc::now().naive_utc()),
        ))
        .get_result::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn delete_budget(&mut self, budget_id: Uuid, user_id: Uuid) -> Result<(), DaoError> {
        let deleted_count = diesel::delete(
            budgets
                .find(budget_id)
                .filter(budget_fields::user_id.eq(user_id)),
        )
        .execute(&mut self.db_thread_pool.get()?)?;

        if deleted_count == 0 {
            return Err(diesel::result::Error::NotFound.into());
        }

        Ok(())
    }

    pub fn get_monthly_summary(
        &mut self,
        user_id: Uuid,
        month: i16,
        year: i32,
    ) -> Result<OutputMonthlySummary, DaoError> {
        let (period_start, period_end) = month_bounds(month, year).ok_or(DaoError::OutOfRange)?;

        let mut db_connection = self.db_thread_pool.get()?;

        let budget_amounts = budgets
            .filter(budget_fields::user_id.eq(user_id))
            .filter(budget_fields::month.eq(month))
            .filter(budget_fields::year.eq(year))
            .select((budget_fields::category, budget_fields::amount))
            .load::<(String, BigDecimal)>(&mut db_connection)?;

        let spent_amounts = expenses
            .filter(expense_fields::user_id.eq(user_id))
            .filter(expense_fields::date.ge(period_start))
            .filter(expense_fields::date.lt(period_end))
            .group_by(expense_fields::category)
            .select((expense_fields::category, dsl::sum(expense_fields::amount)))
            .load::<(String, Option<BigDecimal>)>(&mut db_connection)?;

        Ok(build_summary(month, year, budget_amounts, spent_amounts))
    }
}

// Half-open range [first day of the month, first day of the next month)
fn month_bounds(month: i16, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, 1)?;

    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()? + 1, 1)?
    };

    Some((start, end))
}

fn build_summary(
    month: i16,
    year: i32,
    budget_amounts: Vec<(String, BigDecimal)>,
    spent_amounts: Vec<(String, Option<BigDecimal>)>,
) -> OutputMonthlySummary {
    let zero = BigDecimal::from(0);

    let mut categories: BTreeMap<String, (BigDecimal, BigDecimal)> = BTreeMap::new();

    for (category, amount) in budget_amounts {
        let entry = categories
            .entry(category)
            .or_insert_with(|| (zero.clone(), zero.clone()));
        entry.0 += amount;
    }

    for (category, amount) in spent_amounts {
        let entry = categories
            .entry(category)
            .or_insert_with(|| (zero.clone(), zero.clone()));
        entry.1 += amount.unwrap_or_else(|| zero.clone());
    }

    let mut total_budget = zero.clone();
    let mut total_spent = zero.clone();
    let mut category_breakdown = Vec::with_capacity(categories.len());

    for (category, (budget, spent)) in categories {
        total_budget += &budget;
        total_spent += &spent;

        category_breakdown.push(OutputCategorySpending {
            category,
            budget,
            spent,
        });
    }

    let remaining = &total_budget - &total_spent;

    OutputMonthlySummary {
        month,
        year,
        total_budget,
        total_spent,
        remaining,
        category_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> BigDecimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(6, 2024),
            Some((
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            )),
        );

        // December rolls over into the next year
        assert_eq!(
            month_bounds(12, 2024),
            Some((
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )),
        );

        assert_eq!(month_bounds(0, 2024), None);
        assert_eq!(month_bounds(13, 2024), None);
        assert_eq!(month_bounds(-3, 2024), None);
    }

    #[test]
    fn test_build_summary_remaining_is_budget_minus_spent() {
        let summary = build_summary(
            6,
            2024,
            vec![
                (String::from("Food"), dec("150")),
                (String::from("Rent"), dec("900")),
            ],
            vec![
                (String::from("Food"), Some(dec("50"))),
                (String::from("Travel"), Some(dec("210.25"))),
            ],
        );

        assert_eq!(summary.total_budget, dec("1050"));
        assert_eq!(summary.total_spent, dec("260.25"));
        assert_eq!(
            summary.remaining,
            &summary.total_budget - &summary.total_spent,
        );
    }

    #[test]
    fn test_build_summary_total_spent_matches_breakdown() {
        let summary = build_summary(
            2,
            2023,
            vec![(String::from("Food"), dec("100"))],
            vec![
                (String::from("Food"), Some(dec("12.50"))),
                (String::from("Fun"), Some(dec("30"))),
                (String::from("Utilities"), None),
            ],
        );

        let breakdown_spent_sum = summary
            .category_breakdown
            .iter()
            .fold(BigDecimal::from(0), |acc, c| acc + &c.spent);

        assert_eq!(summary.total_spent, breakdown_spent_sum);
    }

    #[test]
    fn test_build_summary_category_without_budget_appears_with_zero_budget() {
        let summary = build_summary(
            6,
            2024,
            vec![],
            vec![(String::from("Travel"), Some(dec("75")))],
        );

        assert_eq!(
            summary.category_breakdown,
            vec![OutputCategorySpending {
                category: String::from("Travel"),
                budget: BigDecimal::from(0),
                spent: dec("75"),
            }],
        );
    }

    #[test]
    fn test_build_summary_category_without_expenses_appears_with_zero_spent() {
        let summary = build_summary(6, 2024, vec![(String::from("Rent"), dec("900"))], vec![]);

        assert_eq!(
            summary.category_breakdown,
            vec![OutputCategorySpending {
                category: String::from("Rent"),
                budget: dec("900"),
                spent: BigDecimal::from(0),
            }],
        );
        assert_eq!(summary.remaining, dec("900"));
    }

    #[test]
    fn test_build_summary_remaining_may_be_negative() {
        let summary = build_summary(
            6,
            2024,
            vec![(String::from("Food"), dec("100"))],
            vec![(String::from("Food"), Some(dec("140")))],
        );

        assert_eq!(summary.remaining, dec("-40"));
    }

    #[test]
    fn test_build_summary_empty_period() {
        let summary = build_summary(1, 2024, vec![], vec![]);

        assert_eq!(summary.total_budget, BigDecimal::from(0));
        assert_eq!(summary.total_spent, BigDecimal::from(0));
        assert_eq!(summary.remaining, BigDecimal::from(0));
        assert!(summary.category_breakdown.is_empty());
    }
}
