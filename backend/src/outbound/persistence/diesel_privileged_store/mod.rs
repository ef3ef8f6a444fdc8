//! Backend A: the privileged PostgreSQL store.
//!
//! Implements every store port for [`PrivilegedAccess`]. The store connects
//! with the server's own credential through a process-wide pool and applies
//! no per-row authorization; only administrator calls are routed here.
//! Owner filters come from the caller-supplied numeric id.
//!
//! [`PrivilegedAccess`]: crate::domain::ports::PrivilegedAccess

mod budget;
mod conversations;
mod debt;
mod goals;
mod iot;
mod learning;
mod notifications;
mod profiles;
mod translation;

use super::pool::LazyDbPool;

/// Diesel-backed privileged store.
#[derive(Debug, Clone)]
pub struct DieselPrivilegedStore {
    pool: LazyDbPool,
}

impl DieselPrivilegedStore {
    /// Create a store over the given pool.
    pub fn new(pool: LazyDbPool) -> Self {
        Self { pool }
    }
}

fn limit_param(limit: u32) -> i64 {
    i64::from(limit)
}
