pub mod auth_token;
pub mod db;
pub mod models;
pub mod password_hasher;
pub mod request_io;
pub mod schema;
pub mod validators;
