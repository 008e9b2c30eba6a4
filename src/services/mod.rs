//! Service layer for business logic
//!
//! This module provides the activity aggregation logic shared by the HTTP
//! handlers and any other caller.

mod activity_service;
pub mod validation;

pub use activity_service::*;
