//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod artists;
pub mod drinks;
pub mod health;
pub mod shows;
pub mod trivia;
pub mod venues;
