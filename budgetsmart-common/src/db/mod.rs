use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use std::fmt;

pub mod auth;
pub mod budget;
pub mod expense;
pub mod user;

pub type DbThreadPool = diesel::r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_db_thread_pool(database_uri: &str, max_connections: Option<u32>) -> DbThreadPool {
    let manager = ConnectionManager::<PgConnection>::new(database_uri);
    let mut builder = diesel::r2d2::Pool::builder();

    if let Some(max_connections) = max_connections {
        builder = builder.max_size(max_connections);
    }

    builder
        .build(manager)
        .expect("Failed to create DB thread pool")
}

#[derive(Debug)]
pub enum DaoError {
    DbThreadPoolFailure(r2d2::Error),
    QueryFailure(diesel::result::Error),
    AlreadyExists,
    OutOfRange,
}

impl std::error::Error for DaoError {}

impl fmt::Display for DaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoError::DbThreadPoolFailure(e) => {
                write!(f, "DaoError: Failed to obtain DB connection: {}", e)
            }
            DaoError::QueryFailure(e) => {
                write!(f, "DaoError: Query failed: {}", e)
            }
            DaoError::AlreadyExists => {
                write!(f, "DaoError: Record would violate a uniqueness constraint")
            }
            DaoError::OutOfRange => {
                write!(f, "DaoError: Input was outside the valid range")
            }
        }
    }
}

impl From<r2d2::Error> for DaoError {
    fn from(error: r2d2::Error) -> Self {
        DaoError::DbThreadPoolFailure(error)
    }
}

impl From<diesel::result::Error> for DaoError {
    fn from(error: diesel::result::Error) -> Self {
        DaoError::QueryFailure(error)
    }
}

impl DaoError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DaoError::QueryFailure(diesel::result::Error::NotFound)
        )
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            DaoError::AlreadyExists
                | DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ))
        )
    }
}
