//! Failures reported by either backing store.

use super::define_port_error;

define_port_error! {
    /// Errors raised by privileged and tenant store adapters.
    pub enum StoreError {
        /// The store has no usable connection settings.
        Configuration { message: String } =>
            "store is not configured: {message}",
        /// The store could not be reached.
        Connection { message: String } =>
            "store connection failed: {message}",
        /// The query or mutation failed during execution.
        Query { message: String } =>
            "store query failed: {message}",
        /// The forwarded credential was refused.
        Rejected { message: String } =>
            "store rejected the credential: {message}",
        /// A returned row could not be mapped onto a domain record.
        Decode { message: String } =>
            "store returned an unreadable row: {message}",
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
