//! Error types for the matching core.

use thiserror::Error;

use crate::types::OrderId;

/// Error returned by [`crate::state::OrderBook::new_order`] for inputs the
/// core validates at its public boundary.
///
/// Everything else documented as an anomaly in the matching protocol
/// (duplicate order id after a partial match, a no-op bucket removal) is a
/// silent drop, not an error — see the crate-level docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A command carried price zero. Zero is a valid ART key but not a
    /// valid traded price, so it is rejected here rather than silently
    /// resting an unmatchable order at the root of the book.
    #[error("order {order_id}: price must be non-zero")]
    InvalidPrice {
        /// Id of the rejected command.
        order_id: OrderId,
    },
}

/// Result type for [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
