//! HTTP inbound adapter exposing REST endpoints.
//!
//! Data endpoints live under `/api/v1` and require an authenticated
//! caller; probes live at the root.

pub mod budget;
pub mod context;
pub mod debts;
pub mod error;
pub mod goals;
pub mod health;
pub mod notifications;
pub mod payload;
pub mod state;

#[cfg(test)]
mod tests;

use actix_web::web;

pub use error::ApiResult;

/// Prefix of every data endpoint.
pub const API_V1: &str = "/api/v1";

/// Register the `/api/v1` data endpoints.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use assistant_backend::inbound::http::{API_V1, configure_api};
///
/// let app = App::new().service(web::scope(API_V1).configure(configure_api));
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(budget::list_budget_categories)
        .service(budget::create_budget_category)
        .service(goals::list_goals)
        .service(goals::create_goal)
        .service(debts::list_debts)
        .service(notifications::unread_count);
}
