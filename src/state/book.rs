//! The matching engine: two price-indexed ARTs (asks, bids), an id index,
//! and the best-order cache layered on top.

use slotmap::SlotMap;

use super::bucket::OrderBucket;
use super::order::{OrderSlot, RestingOrder};
use crate::art::ArtMap;
use crate::error::{CoreError, CoreResult};
use crate::pool::NodePoolConfig;
use crate::types::{OrderCommand, OrderId, Price, Side, Size};

/// Single-symbol matching core.
///
/// `new_order` is the sole mutator: it must not run concurrently with
/// itself or with any traversal over the same book. Nothing here blocks or
/// allocates across an await point — there are none.
pub struct OrderBook {
    orders: SlotMap<OrderSlot, RestingOrder>,
    asks: ArtMap<OrderBucket>,
    bids: ArtMap<OrderBucket>,
    /// `orderId -> OrderSlot`, non-owning — valid only while the order rests.
    id_index: ArtMap<OrderSlot>,
    best_ask: Option<OrderSlot>,
    best_bid: Option<OrderSlot>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_node_pool_config(NodePoolConfig::default())
    }

    /// Builds a book whose three ARTs (asks, bids, id index) all share the
    /// same node-pool tuning — e.g. to exercise the Node256 shrink
    /// threshold ambiguity between known ART implementations.
    pub fn with_node_pool_config(config: NodePoolConfig) -> Self {
        Self {
            orders: SlotMap::with_key(),
            asks: ArtMap::with_config(config),
            bids: ArtMap::with_config(config),
            id_index: ArtMap::with_config(config),
            best_ask: None,
            best_bid: None,
        }
    }

    /// Applies one command: matches against resting liquidity on the
    /// opposite side, rests any residual on its own side, or silently
    /// drops it (duplicate id after a partial match).
    pub fn new_order(&mut self, cmd: OrderCommand) -> CoreResult<()> {
        if cmd.price == 0 {
            return Err(CoreError::InvalidPrice {
                order_id: cmd.order_id,
            });
        }

        let target = cmd.size.get();
        let mut remaining = target;
        let mut filled: Size = 0;

        while remaining > 0 {
            let Some(slot) = self.best_of(cmd.side.opposite()) else {
                break;
            };
            let (resting_price, available) = {
                let o = &self.orders[slot];
                (o.price(), o.available())
            };
            if !can_match(cmd.side, cmd.price, resting_price) {
                break;
            }
            if available == 0 {
                tracing::warn!(order_id = slot_id(&self.orders, slot), "resting order with zero available size encountered in match loop");
                self.remove_order(slot);
                continue;
            }

            let matched = remaining.min(available);
            self.orders[slot].add_fill(matched);
            self.adjust_bucket_volume(cmd.side.opposite(), resting_price, matched);
            remaining -= matched;
            filled += matched;
            tracing::debug!(
                aggressor_id = cmd.order_id,
                resting_id = self.orders[slot].id(),
                price = resting_price,
                size = matched,
                "matched"
            );

            if self.orders[slot].available() == 0 {
                self.remove_order(slot);
            }
        }

        if filled == target {
            tracing::info!(order_id = cmd.order_id, size = target, "fully matched on arrival");
            return Ok(());
        }

        if self.id_index.contains_key(cmd.order_id) {
            tracing::warn!(order_id = cmd.order_id, "duplicate order id; dropping residual after partial match");
            return Ok(());
        }

        let slot = self.orders.insert(RestingOrder::new(
            cmd.order_id,
            cmd.price,
            target,
            filled,
            cmd.side,
            cmd.owner,
            cmd.timestamp,
        ));
        self.id_index.put(cmd.order_id, slot);
        self.place(cmd.side, cmd.price, slot);
        tracing::info!(
            order_id = cmd.order_id,
            price = cmd.price,
            available = target - filled,
            "order resting"
        );
        Ok(())
    }

    /// Number of distinct prices resting on the ask side.
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Number of distinct prices resting on the bid side.
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Total number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn ask_bucket(&self, price: Price) -> Option<&OrderBucket> {
        self.asks.get(price)
    }

    pub fn bid_bucket(&self, price: Price) -> Option<&OrderBucket> {
        self.bids.get(price)
    }

    pub fn order_by_id(&self, id: OrderId) -> Option<&RestingOrder> {
        let slot = *self.id_index.get(id)?;
        self.orders.get(slot)
    }

    /// Best (lowest) resting ask price and its head order, if any.
    pub fn best_ask(&self) -> Option<(Price, &RestingOrder)> {
        self.best_ask.map(|slot| (self.orders[slot].price(), &self.orders[slot]))
    }

    /// Best (highest) resting bid price and its head order, if any.
    pub fn best_bid(&self) -> Option<(Price, &RestingOrder)> {
        self.best_bid.map(|slot| (self.orders[slot].price(), &self.orders[slot]))
    }

    /// Visits up to `limit` ask buckets, lowest price first.
    pub fn for_each_ask(&self, limit: usize, mut visit: impl FnMut(Price, &OrderBucket)) {
        self.asks.for_each(limit, |price, bucket| visit(price, bucket));
    }

    /// Visits up to `limit` bid buckets, highest price first.
    pub fn for_each_bid_desc(&self, limit: usize, mut visit: impl FnMut(Price, &OrderBucket)) {
        self.bids.for_each_desc(limit, |price, bucket| visit(price, bucket));
    }

    /// Order ids resting at `price` on `side`, oldest first — walks the
    /// bucket's FIFO linked list head to tail. Exposed for FIFO assertions
    /// in tests; not on the matching hot path.
    pub fn bucket_order_ids(&self, side: Side, price: Price) -> Vec<OrderId> {
        let bucket = match side {
            Side::Ask => self.asks.get(price),
            Side::Bid => self.bids.get(price),
        };
        let mut ids = Vec::new();
        let mut cur = bucket.and_then(OrderBucket::head);
        while let Some(slot) = cur {
            let order = &self.orders[slot];
            ids.push(order.id());
            cur = order.next();
        }
        ids
    }

    fn best_of(&self, side: Side) -> Option<OrderSlot> {
        match side {
            Side::Ask => self.best_ask,
            Side::Bid => self.best_bid,
        }
    }

    fn side_and_orders_mut(
        &mut self,
        side: Side,
    ) -> (&mut ArtMap<OrderBucket>, &mut SlotMap<OrderSlot, RestingOrder>) {
        match side {
            Side::Ask => (&mut self.asks, &mut self.orders),
            Side::Bid => (&mut self.bids, &mut self.orders),
        }
    }

    fn adjust_bucket_volume(&mut self, side: Side, price: Price, matched: Size) {
        let (map, _) = self.side_and_orders_mut(side);
        if let Some(bucket) = map.get_mut(price) {
            bucket.adjust_volume(matched);
        }
    }

    /// Appends `slot` to the bucket at `price` on `side`, creating the
    /// bucket if this is its first order, and refreshes the best-order
    /// cache if this newly-resting order now heads the best bucket.
    fn place(&mut self, side: Side, price: Price, slot: OrderSlot) {
        let (map, orders) = self.side_and_orders_mut(side);
        if !map.contains_key(price) {
            map.put(price, OrderBucket::new(price));
        }
        let bucket = map.get_mut(price).expect("bucket just created if absent");
        bucket.push(slot, orders);
        if bucket.head() == Some(slot) {
            self.maybe_improve_best(side, slot, price);
        }
    }

    fn maybe_improve_best(&mut self, side: Side, slot: OrderSlot, price: Price) {
        let current = self.best_of(side).map(|s| self.orders[s].price());
        let improves = match (side, current) {
            (_, None) => true,
            (Side::Ask, Some(p)) => price < p,
            (Side::Bid, Some(p)) => price > p,
        };
        if improves {
            match side {
                Side::Ask => self.best_ask = Some(slot),
                Side::Bid => self.best_bid = Some(slot),
            }
        }
    }

    /// Fully removes `slot`: drops it from the id index, unlinks it from
    /// its bucket, prunes the bucket if it's now empty, and recomputes
    /// the best-order cache if `slot` was the cached best.
    fn remove_order(&mut self, slot: OrderSlot) {
        let order = self.orders.remove(slot).expect("slot tracked by caller must exist");
        self.id_index.remove(order.id());

        if let Some(p) = order.prev() {
            self.orders[p].set_next(order.next());
        }
        if let Some(n) = order.next() {
            self.orders[n].set_prev(order.prev());
        }

        let was_best = self.best_of(order.side()) == Some(slot);

        let (map, _) = self.side_and_orders_mut(order.side());
        let bucket_emptied = match map.get_mut(order.price()) {
            Some(bucket) => {
                bucket.unlink(slot, order.prev(), order.next(), order.available());
                bucket.is_empty()
            }
            None => false,
        };
        if bucket_emptied {
            map.remove(order.price());
        }

        if was_best {
            self.refresh_best(order.side());
        }
    }

    /// Recomputes the cached best for `side` via a 1-limited ordered scan:
    /// ascending for asks (lowest price), descending for bids (highest).
    fn refresh_best(&mut self, side: Side) {
        let next_best = match side {
            Side::Ask => self.asks.first().and_then(|(_, b)| b.head()),
            Side::Bid => self.bids.last().and_then(|(_, b)| b.head()),
        };
        match side {
            Side::Ask => self.best_ask = next_best,
            Side::Bid => self.best_bid = next_best,
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

fn can_match(aggressor_side: Side, aggressor_price: Price, resting_price: Price) -> bool {
    match aggressor_side {
        Side::Ask => resting_price >= aggressor_price,
        Side::Bid => resting_price <= aggressor_price,
    }
}

fn slot_id(orders: &SlotMap<OrderSlot, RestingOrder>, slot: OrderSlot) -> OrderId {
    orders.get(slot).map(RestingOrder::id).unwrap_or_default()
}
