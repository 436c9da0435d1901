use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveTime;
use derive_more::Display;
use serde_json::json;

/// Rejections of a submission or registration before anything is written.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ValidationError {
    #[display(fmt = "hours_worked must be a positive number, got {}", _0)]
    NonPositiveHours(f64),

    #[display(fmt = "{} must not be blank", _0)]
    BlankField(&'static str),

    #[display(fmt = "no employee registered with id '{}'", _0)]
    UnknownEmployee(String),

    #[display(fmt = "submissions are closed at {}", _0)]
    OutsideSubmissionWindow(NaiveTime),

    #[display(fmt = "current password is incorrect")]
    WrongPassword,
}

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Validation(ValidationError),

    #[display(fmt = "employee '{}' is already registered", _0)]
    UniquenessViolation(String),

    #[display(fmt = "employee '{}' not found", _0)]
    NotFound(String),

    #[display(fmt = "timesheet store unavailable: {}", _0)]
    Unavailable(sqlx::Error),

    #[display(fmt = "credential processing failed: {}", _0)]
    Credential(String),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Unavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Unavailable(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UniquenessViolation(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // don't leak driver or hashing details to the caller
            AppError::Unavailable(e) => {
                tracing::error!(error = %e, "Timesheet store unavailable");
                "Store unavailable, try again".to_string()
            }
            AppError::Credential(e) => {
                tracing::error!(error = %e, "Credential processing failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
