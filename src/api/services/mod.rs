pub mod activities;
pub mod health;

pub use activities::activity_routes;
pub use health::{AppStartTime, HealthService, health_routes};
