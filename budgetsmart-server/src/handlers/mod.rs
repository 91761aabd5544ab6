pub mod analytics;
pub mod auth;
pub mod budget;
pub mod expense;
pub mod health;
pub mod user;

pub mod error {
    use actix_web::http::{header, StatusCode};
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use std::fmt;

    #[derive(Debug)]
    pub enum ServerError {
        // 400 Errors
        InvalidFormat(Option<String>),
        InputRejected(Option<String>),
        AlreadyExists(Option<String>),
        UserUnauthorized(Option<String>),
        NotFound(Option<String>),

        // 500 Errors
        InternalError(Option<String>),
        DatabaseTransactionError(Option<String>),
    }

    impl std::error::Error for ServerError {}

    impl fmt::Display for ServerError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ServerError::InvalidFormat(msg) => format_err(f, "Invalid request format", msg),
                ServerError::InputRejected(msg) => format_err(f, "Input rejected", msg),
                ServerError::AlreadyExists(msg) => format_err(f, "Already exists", msg),
                ServerError::UserUnauthorized(msg) => format_err(f, "User unauthorized", msg),
                ServerError::NotFound(msg) => format_err(f, "Not found", msg),
                ServerError::InternalError(msg) => format_err(f, "Internal server error", msg),
                ServerError::DatabaseTransactionError(msg) => {
                    format_err(f, "Database transaction failed", msg)
                }
            }
        }
    }

    impl actix_web::error::ResponseError for ServerError {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code())
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .body(self.to_string())
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                ServerError::InvalidFormat(_)
                | ServerError::InputRejected(_)
                | ServerError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
                ServerError::UserUnauthorized(_) => StatusCode::UNAUTHORIZED,
                ServerError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl From<actix_web::error::BlockingError> for ServerError {
        fn from(_error: actix_web::error::BlockingError) -> Self {
            ServerError::InternalError(Some(String::from("Actix thread pool failure")))
        }
    }

    fn format_err(
        f: &mut fmt::Formatter<'_>,
        error_txt: &str,
        msg: &Option<String>,
    ) -> fmt::Result {
        write!(
            f,
            "{{ \"error\": \"{}{}\" }}",
            error_txt,
            if let Some(msg) = msg {
                format!(": {}", msg)
            } else {
                String::new()
            }
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use actix_web::error::ResponseError;

        #[test]
        fn test_error_body_is_json_with_error_key() {
            let error = ServerError::NotFound(Some(String::from("Expense not found")));
            let body = error.to_string();

            let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed["error"], "Not found: Expense not found");

            let error = ServerError::InternalError(None);
            let parsed: serde_json::Value = serde_json::from_str(&error.to_string()).unwrap();
            assert_eq!(parsed["error"], "Internal server error");
        }

        #[test]
        fn test_status_codes() {
            assert_eq!(
                ServerError::InvalidFormat(None).status_code(),
                StatusCode::BAD_REQUEST,
            );
            assert_eq!(
                ServerError::AlreadyExists(None).status_code(),
                StatusCode::BAD_REQUEST,
            );
            assert_eq!(
                ServerError::UserUnauthorized(None).status_code(),
                StatusCode::UNAUTHORIZED,
            );
            assert_eq!(
                ServerError::NotFound(None).status_code(),
                StatusCode::NOT_FOUND,
            );
            assert_eq!(
                ServerError::DatabaseTransactionError(None).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR,
            );
        }
    }
}
