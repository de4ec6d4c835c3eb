//! Wire-level types for the matching core's command stream.

mod order;

pub use order::{OrderCommand, Side};

/// Unique identifier of an order, supplied by the caller.
pub type OrderId = u64;

/// Price in integer ticks. Ordered and keyed as an unsigned 64-bit integer
/// throughout the book (see [`crate::art`]'s key-ordering notes).
pub type Price = u64;

/// Order/fill size in integer units.
pub type Size = u64;

/// Owning account/user id, opaque to the matching core.
pub type Uid = u64;
