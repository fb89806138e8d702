//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod auth;
pub mod certificates;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod error;
pub mod exams;
pub mod health;
pub mod notifications;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod webhook_signature;
pub mod webhooks;

pub use error::ApiResult;
