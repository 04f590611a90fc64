//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! error shaping, and the bearer-token permission gate.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{Authorized, CreateDrink, DeleteDrink, Permission, ReadDrinkDetail, UpdateDrink};
pub use error_handler::{error_to_status_code, global_error_handler, standard_message};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
