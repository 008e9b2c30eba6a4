//! Activity Service - student activity click aggregation
//!
//! Records per-student, per-course-module click totals by calendar date and
//! exposes create/read/update/delete, filtered listings, sums and an
//! increment-or-create operation over HTTP.
//!
//! # Architecture
//! - `storage`: `ActivityStore` trait and the SeaORM backend
//! - `services`: aggregation logic (`ActivityService`)
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
