use actix_web::{web, HttpResponse};
use budgetsmart_common::db;
use budgetsmart_common::db::DbThreadPool;
use budgetsmart_common::request_io::InputMonthYear;
use chrono::Datelike;

use crate::handlers::error::ServerError;
use crate::middleware::auth::AuthorizedUser;

pub async fn summary(
    db_thread_pool: web::Data<DbThreadPool>,
    authorized_user: AuthorizedUser,
    period: web::Query<InputMonthYear>,
) -> Result<HttpResponse, ServerError> {
    let current_date = chrono::Utc::now().date_naive();
    let month = period
        .month
        .unwrap_or_else(|| i16::try_from(current_date.month()).unwrap_or(1));
    let year = period.year.unwrap_or_else(|| current_date.year());

    if !(1..=12).contains(&month) {
        return Err(ServerError::InvalidFormat(Some(String::from(
            "Month must be between 1 and 12",
        ))));
    }

    let user_id = authorized_user.0.id;

    let summary = match web::block(move || {
        let mut budget_dao = db::budget::Dao::new(&db_thread_pool);
        budget_dao.get_monthly_summary(user_id, month, year)
    })
    .await?
    {
        Ok(s) => s,
        Err(db::DaoError::OutOfRange) => {
            return Err(ServerError::InvalidFormat(Some(String::from(
                "Month or year is out of range",
            ))));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(ServerError::DatabaseTransactionError(Some(String::from(
                "Failed to compute summary",
            ))));
        }
    };

    Ok(HttpResponse::Ok().json(summary))
}
