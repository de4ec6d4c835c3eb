//! Inbound order command and its side.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use super::{OrderId, Price, Uid};

/// Side of an order: which side of the book it rests on (or matches
/// against) if not fully filled on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    /// The opposite side, i.e. where a matching counterparty rests.
    pub fn opposite(self) -> Side {
        match self {
            Side::Ask => Side::Bid,
            Side::Bid => Side::Ask,
        }
    }
}

/// A single `newOrder` command as it arrives on the command stream.
///
/// `symbol` and `reserve_bid_price` are carried opaquely: the matching
/// core is single-symbol and never reads either field, but both are
/// mandatory on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCommand {
    pub order_id: OrderId,
    pub price: Price,
    pub size: NonZeroU64,
    pub side: Side,
    pub owner: Uid,
    pub timestamp: i64,
    pub symbol: String,
    #[serde(default)]
    pub reserve_bid_price: Option<Price>,
}

impl OrderCommand {
    /// Convenience constructor for the common case with no reserve price.
    pub fn new(
        order_id: OrderId,
        price: Price,
        size: NonZeroU64,
        side: Side,
        owner: Uid,
        timestamp: i64,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            price,
            size,
            side,
            owner,
            timestamp,
            symbol: symbol.into(),
            reserve_bid_price: None,
        }
    }
}
