//! PostgreSQL persistence for the privileged store using Diesel ORM.
//!
//! Backend A is reached with the server's own credential through a
//! process-wide `bb8` pool managed by `diesel-async`. The pool is built on
//! first use, so a missing database URL only fails calls that actually need
//! the privileged store.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; adapters translate them into domain records and
//! map every database failure onto
//! [`StoreError`](crate::domain::ports::StoreError).
//!
//! # Example
//!
//! ```ignore
//! use assistant_backend::outbound::persistence::{
//!     DieselPrivilegedStore, DieselUserDirectory, LazyDbPool, PoolConfig,
//! };
//!
//! let pool = LazyDbPool::new(Some(PoolConfig::new("postgres://localhost/assistant")));
//! let store = DieselPrivilegedStore::new(pool.clone());
//! let directory = DieselUserDirectory::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_privileged_store;
mod diesel_user_directory;
mod models;
mod pool;
mod schema;

pub use diesel_privileged_store::DieselPrivilegedStore;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DbPool, LazyDbPool, PoolConfig, PoolError};
