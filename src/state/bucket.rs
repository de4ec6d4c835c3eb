//! FIFO queue of resting orders at one price.

use slotmap::SlotMap;

use super::order::{OrderSlot, RestingOrder};
use crate::types::{Price, Size};

/// All orders resting at a single price on one side of the book.
///
/// Time priority is oldest-first: `head` is the next order to be matched,
/// `tail` is the most recently rested one. Both arena mutation (linking a
/// new tail, rewriting head/tail on removal) and the cached aggregates
/// live here; the backing storage for orders themselves is the
/// [`super::OrderBook`]'s single slotmap arena, not this bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderBucket {
    price: Price,
    head: Option<OrderSlot>,
    tail: Option<OrderSlot>,
    num_orders: u64,
    total_volume: Size,
}

impl OrderBucket {
    pub(crate) fn new(price: Price) -> Self {
        Self {
            price,
            head: None,
            tail: None,
            num_orders: 0,
            total_volume: 0,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn head(&self) -> Option<OrderSlot> {
        self.head
    }

    pub fn tail(&self) -> Option<OrderSlot> {
        self.tail
    }

    pub fn num_orders(&self) -> u64 {
        self.num_orders
    }

    pub fn total_volume(&self) -> Size {
        self.total_volume
    }

    /// `head == tail == None` iff `num_orders == 0` iff [`Self::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.num_orders == 0
    }

    /// Appends `slot` at the tail, linking it behind the previous tail.
    pub(crate) fn push(&mut self, slot: OrderSlot, orders: &mut SlotMap<OrderSlot, RestingOrder>) {
        let old_tail = self.tail;
        orders[slot].set_prev(old_tail);
        orders[slot].set_next(None);
        if let Some(t) = old_tail {
            orders[t].set_next(Some(slot));
        }
        if self.head.is_none() {
            self.head = Some(slot);
        }
        self.tail = Some(slot);
        self.num_orders += 1;
        self.total_volume += orders[slot].available();
    }

    /// Decrements cached volume by a just-matched amount.
    /// Called while the matched order is still resting (possibly with
    /// `available() == 0`, about to be removed by the caller).
    pub(crate) fn adjust_volume(&mut self, matched: Size) {
        self.total_volume -= matched;
    }

    /// Unlinks `slot` from this bucket's head/tail and counters. The
    /// caller has already relinked `slot`'s siblings in the orders arena
    /// (an O(1) unlink needs only `prev`/`next`, not this bucket).
    pub(crate) fn unlink(
        &mut self,
        slot: OrderSlot,
        prev: Option<OrderSlot>,
        next: Option<OrderSlot>,
        available: Size,
    ) {
        if self.head == Some(slot) {
            self.head = next;
        }
        if self.tail == Some(slot) {
            self.tail = prev;
        }
        self.num_orders -= 1;
        self.total_volume -= available;
    }
}
