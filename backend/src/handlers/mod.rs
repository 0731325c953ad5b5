//! HTTP handlers for the AgroLens risk service

pub mod assessment;
pub mod health;

pub use assessment::create_assessment;
pub use health::health_check;
