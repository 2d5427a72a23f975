//! Observable session state.
//!
//! Each piece of state lives in a [`Store`], which hands out `watch`
//! receivers so front ends can re-render when something actually changed.

use courier::{
    cart::{Cart, CartError, CartItemUuid, NewCartItem},
    orders::{Order, OrderTracker, StatusUpdate},
};
use tokio::sync::watch;
use tracing::debug;

/// A value with change notification.
///
/// Mutations run with exclusive access to the value; subscribers are woken
/// only when the mutation reports a change.
#[derive(Debug)]
pub struct Store<T> {
    sender: watch::Sender<T>,
}

impl<T> Store<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        let (sender, _receiver) = watch::channel(value);

        Self { sender }
    }

    /// Receiver that sees every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Read the current value.
    pub fn read<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.sender.borrow())
    }

    /// Mutate the value. `modify` returns whether it changed anything, and
    /// subscribers are notified only if it did.
    pub fn update(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.sender.send_if_modified(modify)
    }
}

impl<T: Clone> Store<T> {
    /// Copy of the current value.
    pub fn snapshot(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq> Store<T> {
    /// Mutate the value, notifying subscribers when it differs afterwards.
    pub fn modify(&self, modify: impl FnOnce(&mut T)) -> bool {
        self.update(|value| {
            let before = value.clone();
            modify(value);
            *value != before
        })
    }
}

/// State for one user session: the cart being built and the order being
/// tracked.
#[derive(Debug, Default)]
pub struct Session {
    cart: Store<Cart>,
    tracker: Store<OrderTracker>,
}

impl Session {
    /// A session with an empty cart and no current order.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart store
    pub fn cart(&self) -> &Store<Cart> {
        &self.cart
    }

    /// The order tracker store
    pub fn tracker(&self) -> &Store<OrderTracker> {
        &self.tracker
    }

    /// Add an item to the cart, refusing items from a second restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::RestaurantMismatch`] when the cart already holds
    /// another restaurant's items.
    pub fn add_item(
        &self,
        item: NewCartItem,
        restaurant_name: Option<&str>,
    ) -> Result<(), CartError> {
        let mut rejected = None;

        self.cart.update(|cart| match cart.try_add_item(item, restaurant_name) {
            Ok(line) => {
                debug!(%line, "cart line added");
                true
            }
            Err(error) => {
                rejected = Some(error);
                false
            }
        });

        rejected.map_or(Ok(()), Err)
    }

    /// Remove a cart line.
    pub fn remove_item(&self, uuid: CartItemUuid) {
        self.cart.modify(|cart| cart.remove_item(uuid));
    }

    /// Set a cart line's quantity; zero or below removes it.
    pub fn update_quantity(&self, uuid: CartItemUuid, quantity: i64) {
        self.cart.modify(|cart| cart.update_quantity(uuid, quantity));
    }

    /// Replace a cart line's note.
    pub fn update_note(&self, uuid: CartItemUuid, note: &str) {
        self.cart.modify(|cart| cart.update_note(uuid, note));
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.cart.modify(Cart::clear);
    }

    /// Current order, if any
    pub fn current_order(&self) -> Option<Order> {
        self.tracker.read(|tracker| tracker.current_order().cloned())
    }

    /// Start tracking `order`.
    pub fn set_current_order(&self, order: Order) {
        self.tracker.update(|tracker| {
            tracker.set_current_order(order);
            true
        });
    }

    /// Stop tracking the current order.
    pub fn clear_current_order(&self) {
        self.tracker.modify(OrderTracker::clear_current_order);
    }

    /// Apply a status update to the current order. Returns `false` when there
    /// is no current order or the update would move it backwards.
    pub fn apply_status(&self, update: StatusUpdate) -> bool {
        self.tracker.update(|tracker| tracker.apply_status(update))
    }

    /// Track a freshly placed order and empty the cart it came from.
    pub fn complete_checkout(&self, order: Order) {
        debug!(order = %order.uuid(), "checkout complete");

        self.set_current_order(order);
        self.clear_cart();
    }
}
