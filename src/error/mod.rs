mod app_error;
mod auth_error;
mod database_converter;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use auth_error::AuthError;
pub use database_converter::DatabaseErrorConverter;
