//! Order administration over the shared snapshot store.

use belle_core::order::{Order, OrderError, OrderNumber, OrderStatus};
use belle_core::store::{SharedStore, StoreError};

/// Repository for order administration.
pub struct OrderRepository<'a> {
    store: &'a SharedStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self { store }
    }

    /// List every order, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.store.read(|state| {
            let mut orders = state.orders.clone();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })
    }

    /// Get an order by its number.
    #[must_use]
    pub fn get(&self, number: &OrderNumber) -> Option<Order> {
        self.store
            .read(|state| state.orders.iter().find(|o| o.number == *number).cloned())
    }

    /// Transition an order to a new status.
    ///
    /// Returns `None` when no order carries that number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be persisted. The inner
    /// `OrderError` reports a rejected transition.
    pub fn set_status(
        &self,
        number: &OrderNumber,
        status: OrderStatus,
    ) -> Result<Option<Result<Order, OrderError>>, StoreError> {
        self.store.mutate(|state| {
            let order = state.orders.iter_mut().find(|o| o.number == *number)?;
            Some(order.set_status(status).map(|()| order.clone()))
        })
    }
}
