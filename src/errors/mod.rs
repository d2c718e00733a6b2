use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Timeout(String),
    InternalServerError(String),
    DatabaseError(String),
    RpcError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Timeout(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg)
            | AppError::RpcError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::RpcError(msg) => write!(f, "RPC Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse { error: self.message().to_string() };
        match self {
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            AppError::Conflict(_) => HttpResponse::Conflict().json(body),
            // Downstream failures, missing rows included, are opaque to the HTTP caller.
            AppError::NotFound(_)
            | AppError::Timeout(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::RpcError(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("no sql rows".to_string()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict(db_err.message().to_string())
            }
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => tonic::Status::not_found(msg),
            AppError::BadRequest(msg) => tonic::Status::invalid_argument(msg),
            AppError::Conflict(msg) => tonic::Status::already_exists(msg),
            AppError::Timeout(msg) => tonic::Status::deadline_exceeded(msg),
            AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg)
            | AppError::RpcError(msg) => tonic::Status::internal(msg),
        }
    }
}

impl From<tonic::Status> for AppError {
    fn from(status: tonic::Status) -> Self {
        AppError::RpcError(status.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn zero_rows_is_not_found_inside_services() {
        let status: tonic::Status = AppError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[test]
    fn gateway_status_codes() {
        assert_eq!(
            AppError::BadRequest("x".into()).error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("x".into()).error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(tonic::Status::not_found("gone")).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rpc_error_keeps_downstream_message() {
        let err = AppError::from(tonic::Status::internal("no sql rows"));
        assert_eq!(err.message(), "no sql rows");
    }
}
