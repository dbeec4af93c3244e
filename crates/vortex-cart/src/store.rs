//! The cart store: sole owner of cart state.
//!
//! Every mutation follows the same sequence: change the in-memory cart,
//! write it to storage, tell observers. Failures never escape as panics;
//! each one is logged, reported to observers as a [`Notice`], and returned
//! to the caller as a [`CartError`].

use crate::cart::{Cart, CartLine, CartPricing, ProductRef, Quantity, MAX_QUANTITY};
use crate::checkout::{OrderConfirmation, OrderForm};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::observer::{CartChange, CartObserver, Notice};
use vortex_cache::{Cache, KvBackend};

/// Storage key the cart lives under unless told otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "vortex_warenkorb";

/// Result of restoring the cart from storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A saved cart was found and restored.
    Restored { lines: usize },
    /// Nothing was saved; the cart starts empty.
    Empty,
    /// Saved data was unreadable; the cart was reset to empty.
    Recovered(CartError),
}

/// Owns the cart, its persistence, and its observers.
///
/// # Example
///
/// ```
/// use vortex_cache::Cache;
/// use vortex_cart::{CartStore, ProductRef};
///
/// let mut store = CartStore::open(Cache::in_memory());
/// store.add_item(&ProductRef::new("a1", "Widget", "9.99")).unwrap();
/// store.add_item(&ProductRef::new("a1", "Widget", "9.99")).unwrap();
///
/// assert_eq!(store.count(), 2);
/// assert_eq!(store.total().to_string(), "19.98");
/// assert_eq!(store.grand_total().to_string(), "24.98");
/// ```
pub struct CartStore<B> {
    cache: Cache<B>,
    key: String,
    cart: Cart,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<B: KvBackend> CartStore<B> {
    /// Create a store with an empty cart, without reading storage.
    ///
    /// Subscribe observers first, then call [`load`](Self::load), so that
    /// storage problems found while loading reach them.
    pub fn new(cache: Cache<B>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            cart: Cart::new(),
            observers: Vec::new(),
        }
    }

    /// Create a store under [`DEFAULT_STORAGE_KEY`] and load it.
    pub fn open(cache: Cache<B>) -> Self {
        let mut store = Self::new(cache, DEFAULT_STORAGE_KEY);
        store.load();
        store
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Restore the cart from storage.
    ///
    /// Missing data yields an empty cart. Unreadable data is logged,
    /// reported as a warning notice, and also yields an empty cart.
    pub fn load(&mut self) -> LoadOutcome {
        match self.cache.get::<Cart>(&self.key) {
            Ok(Some(cart)) => {
                tracing::debug!(key = %self.key, lines = cart.len(), "restored cart");
                let lines = cart.len();
                self.cart = cart;
                LoadOutcome::Restored { lines }
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved cart");
                self.cart = Cart::new();
                LoadOutcome::Empty
            }
            Err(e) => {
                let err = CartError::from(e);
                tracing::warn!(
                    key = %self.key,
                    kind = %err.kind(),
                    error = %err,
                    "discarding unreadable cart"
                );
                self.cart = Cart::new();
                self.emit_notice(Notice::warning(
                    "Saved cart could not be restored; starting with an empty cart",
                ));
                LoadOutcome::Recovered(err)
            }
        }
    }

    /// Re-read storage and tell observers the cart may have changed.
    pub fn reload(&mut self) -> LoadOutcome {
        let outcome = self.load();
        self.notify(CartChange::Reloaded);
        outcome
    }

    /// Add one unit of a product.
    ///
    /// Rejects incomplete product data and unparsable prices with
    /// [`CartError::InvalidProduct`], and increments past the per-item
    /// maximum with [`CartError::QuantityLimit`]. A rejected call changes
    /// nothing and writes nothing.
    pub fn add_item(&mut self, product: &ProductRef) -> Result<CartLine, CartError> {
        let line = product.validate().map_err(|e| self.reject(e))?;
        let stored = match self.cart.add(line) {
            Ok(stored) => stored.clone(),
            Err(e) => return Err(self.reject(e)),
        };

        tracing::debug!(id = %stored.id, quantity = %stored.quantity, "added item");
        self.persist();
        self.notify(CartChange::ItemAdded {
            id: stored.id.clone(),
            quantity: stored.quantity,
        });
        self.emit_notice(Notice::success(format!("\"{}\" added to cart", stored.name)));
        Ok(stored)
    }

    /// Remove a product's line.
    ///
    /// Removing a product that isn't in the cart does nothing at all.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartLine> {
        let removed = self.cart.remove(id)?;

        tracing::debug!(id = %id, "removed item");
        self.persist();
        self.notify(CartChange::ItemRemoved { id: id.clone() });
        self.emit_notice(Notice::info(format!("\"{}\" removed", removed.name)));
        Some(removed)
    }

    /// Set a line's quantity, clamped to `1..=5`.
    ///
    /// Returns the stored quantity, or `None` (and does nothing) if the
    /// product isn't in the cart.
    pub fn set_quantity(&mut self, id: &ProductId, requested: i64) -> Option<Quantity> {
        let quantity = self.cart.set_quantity(id, requested)?;

        tracing::debug!(id = %id, requested, quantity = %quantity, "set quantity");
        self.persist();
        self.notify(CartChange::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        Some(quantity)
    }

    /// One more of a line, stopping at the maximum.
    pub fn increment(&mut self, id: &ProductId) -> Option<Quantity> {
        let current = self.cart.get(id)?.quantity;
        self.set_quantity(id, i64::from(current.get()) + 1)
    }

    /// One fewer of a line, stopping at the minimum.
    pub fn decrement(&mut self, id: &ProductId) -> Option<Quantity> {
        let current = self.cart.get(id)?.quantity;
        self.set_quantity(id, i64::from(current.get()) - 1)
    }

    /// Remove every line. Returns `false` if the cart was already empty.
    pub fn empty_cart(&mut self) -> bool {
        if self.cart.is_empty() {
            return false;
        }

        self.cart.clear();
        tracing::debug!(key = %self.key, "emptied cart");
        self.persist();
        self.notify(CartChange::Emptied);
        self.emit_notice(Notice::info("Cart emptied"));
        true
    }

    /// Place the order described by `form`.
    ///
    /// All form fields must be filled in; otherwise
    /// [`CartError::MissingFields`] is returned and the cart is untouched.
    /// On success the cart is emptied and the confirmation carries the
    /// grand total (subtotal plus shipping).
    pub fn checkout(&mut self, form: &OrderForm) -> Result<OrderConfirmation, CartError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(self.reject(CartError::MissingFields(missing)));
        }

        let confirmation = OrderConfirmation::from_cart(&self.cart, form);
        tracing::info!(
            order = %confirmation.id,
            items = confirmation.item_count,
            amount = %confirmation.grand_total,
            "order placed"
        );
        self.emit_notice(Notice::success(format!(
            "Order placed! ({})",
            confirmation.grand_total
        )));

        self.cart.clear();
        self.persist();
        self.notify(CartChange::CheckedOut {
            order: confirmation.id.clone(),
        });
        Ok(confirmation)
    }

    /// Look up a line, treating absence as an error.
    pub fn require(&self, id: &ProductId) -> Result<&CartLine, CartError> {
        self.cart
            .get(id)
            .ok_or_else(|| CartError::NotFound(id.to_string()))
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.cart.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of price times quantity.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Sum of quantities.
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    /// Total plus shipping.
    pub fn grand_total(&self) -> Money {
        self.cart.grand_total()
    }

    pub fn pricing(&self) -> CartPricing {
        self.cart.pricing()
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache(&self) -> &Cache<B> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut Cache<B> {
        &mut self.cache
    }

    /// Write the cart. A failed write is reported but never undoes the change.
    fn persist(&mut self) {
        match self.cache.set(&self.key, &self.cart) {
            Ok(()) => tracing::trace!(key = %self.key, lines = self.cart.len(), "saved cart"),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to save cart");
                self.emit_notice(Notice::error(format!("Cart could not be saved: {e}")));
            }
        }
    }

    /// Log and report a rejected operation, handing the error back.
    fn reject(&mut self, err: CartError) -> CartError {
        let notice = match &err {
            CartError::QuantityLimit { .. } => {
                Notice::warning(format!("Maximum {MAX_QUANTITY} per item"))
            }
            CartError::MissingFields(_) => {
                Notice::error(format!("Please fill in all fields ({err})"))
            }
            other => Notice::error(other.to_string()),
        };
        tracing::warn!(kind = %err.kind(), error = %err, "rejected cart operation");
        self.emit_notice(notice);
        err
    }

    fn notify(&mut self, change: CartChange) {
        for observer in self.observers.iter_mut() {
            observer.cart_changed(&change, &self.cart);
        }
    }

    fn emit_notice(&mut self, notice: Notice) {
        for observer in self.observers.iter_mut() {
            observer.notice(&notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NoticeLevel, RecordingObserver};
    use std::cell::RefCell;
    use std::rc::Rc;
    use vortex_cache::{CacheError, MemoryBackend};

    type EventLog = Rc<RefCell<Vec<&'static str>>>;

    /// Backend that records each write in a shared log.
    struct LoggedBackend {
        inner: MemoryBackend,
        log: EventLog,
    }

    impl KvBackend for LoggedBackend {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
            self.log.borrow_mut().push("persist");
            self.inner.set(key, value)
        }

        fn delete(&mut self, key: &str) -> Result<(), CacheError> {
            self.inner.delete(key)
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            self.inner.keys()
        }
    }

    struct LoggedObserver(EventLog);

    impl CartObserver for LoggedObserver {
        fn cart_changed(&mut self, _change: &CartChange, _cart: &Cart) {
            self.0.borrow_mut().push("notify");
        }
    }

    fn store_with_recorder() -> (CartStore<MemoryBackend>, Rc<RefCell<RecordingObserver>>) {
        let recorder = Rc::new(RefCell::new(RecordingObserver::default()));
        let mut store = CartStore::new(Cache::in_memory(), DEFAULT_STORAGE_KEY);
        store.subscribe(Rc::clone(&recorder));
        store.load();
        (store, recorder)
    }

    fn widget() -> ProductRef {
        ProductRef::new("a1", "Widget", "9.99")
    }

    #[test]
    fn test_open_empty_storage() {
        let mut store = CartStore::new(Cache::in_memory(), DEFAULT_STORAGE_KEY);
        assert_eq!(store.load(), LoadOutcome::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_then_notifies() {
        let (mut store, recorder) = store_with_recorder();
        store.add_item(&widget()).unwrap();

        assert_eq!(store.cache().backend().writes(), 1);
        let recorder = recorder.borrow();
        assert_eq!(
            recorder.changes,
            vec![CartChange::ItemAdded {
                id: ProductId::new("a1"),
                quantity: Quantity::ONE,
            }]
        );
        assert_eq!(recorder.notices, vec![Notice::success("\"Widget\" added to cart")]);
    }

    #[test]
    fn test_every_mutation_persists_before_notifying() {
        let log = EventLog::default();
        let backend = LoggedBackend {
            inner: MemoryBackend::new(),
            log: Rc::clone(&log),
        };
        let mut store = CartStore::new(Cache::new(backend), DEFAULT_STORAGE_KEY);
        store.subscribe(LoggedObserver(Rc::clone(&log)));
        store.load();
        let id = ProductId::new("a1");
        let form = OrderForm {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            address: Some("1 Way".into()),
            city: Some("London".into()),
            payment: Some("card".into()),
        };

        log.borrow_mut().clear();

        store.add_item(&widget()).unwrap();
        assert_persist_then_notify(&log, "add");
        store.set_quantity(&id, 3).unwrap();
        assert_persist_then_notify(&log, "set");
        store.remove_item(&id).unwrap();
        assert_persist_then_notify(&log, "remove");
        store.add_item(&widget()).unwrap();
        assert_persist_then_notify(&log, "add again");
        assert!(store.empty_cart());
        assert_persist_then_notify(&log, "empty");
        store.add_item(&widget()).unwrap();
        assert_persist_then_notify(&log, "add for checkout");
        store.checkout(&form).unwrap();
        assert_persist_then_notify(&log, "checkout");
    }

    fn assert_persist_then_notify(log: &EventLog, op: &str) {
        assert_eq!(*log.borrow(), vec!["persist", "notify"], "{op}");
        log.borrow_mut().clear();
    }

    #[test]
    fn test_quantity_limit_notice() {
        let (mut store, recorder) = store_with_recorder();
        for _ in 0..5 {
            store.add_item(&widget()).unwrap();
        }
        let err = store.add_item(&widget()).unwrap_err();

        assert_eq!(err.kind().as_str(), "quantity-limit");
        assert_eq!(store.cache().backend().writes(), 5);
        let last = recorder.borrow().notices.last().cloned().unwrap();
        assert_eq!(last, Notice::warning("Maximum 5 per item"));
    }

    #[test]
    fn test_invalid_product_reports_error() {
        let (mut store, recorder) = store_with_recorder();
        let mut product = widget();
        product.id = None;

        assert!(store.add_item(&product).is_err());
        assert!(store.is_empty());
        assert_eq!(store.cache().backend().writes(), 0);
        let recorder = recorder.borrow();
        assert!(recorder.changes.is_empty());
        assert_eq!(recorder.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_remove_missing_is_silent() {
        let (mut store, recorder) = store_with_recorder();
        assert!(store.remove_item(&ProductId::new("ghost")).is_none());

        assert_eq!(store.cache().backend().writes(), 0);
        assert!(recorder.borrow().changes.is_empty());
        assert!(recorder.borrow().notices.is_empty());
    }

    #[test]
    fn test_increment_and_decrement_clamp() {
        let (mut store, _) = store_with_recorder();
        store.add_item(&widget()).unwrap();
        let id = ProductId::new("a1");

        assert_eq!(store.decrement(&id), Some(Quantity::ONE));
        for _ in 0..10 {
            store.increment(&id);
        }
        assert_eq!(store.get(&id).unwrap().quantity, Quantity::MAX);
        assert!(store.increment(&ProductId::new("ghost")).is_none());
    }

    #[test]
    fn test_empty_cart_when_already_empty() {
        let (mut store, recorder) = store_with_recorder();
        assert!(!store.empty_cart());
        assert_eq!(store.cache().backend().writes(), 0);
        assert!(recorder.borrow().notices.is_empty());
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let (mut store, recorder) = store_with_recorder();
        store.cache_mut().backend_mut().reject_writes(true);

        let line = store.add_item(&widget()).unwrap();
        assert_eq!(line.quantity, Quantity::ONE);
        assert_eq!(store.count(), 1);

        let recorder = recorder.borrow();
        assert_eq!(recorder.changes.len(), 1);
        assert_eq!(recorder.notices[0].level, NoticeLevel::Error);
        assert!(recorder.notices[0].message.starts_with("Cart could not be saved"));
        assert_eq!(recorder.notices[1].level, NoticeLevel::Success);
    }

    #[test]
    fn test_corrupt_storage_recovers() {
        let recorder = Rc::new(RefCell::new(RecordingObserver::default()));
        let backend = MemoryBackend::with_entry(DEFAULT_STORAGE_KEY, "[{\"id\":");
        let mut store = CartStore::new(Cache::new(backend), DEFAULT_STORAGE_KEY);
        store.subscribe(Rc::clone(&recorder));

        let outcome = store.load();
        assert!(matches!(outcome, LoadOutcome::Recovered(CartError::StorageCorrupt(_))));
        assert!(store.is_empty());
        assert_eq!(recorder.borrow().notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_require() {
        let (mut store, _) = store_with_recorder();
        store.add_item(&widget()).unwrap();

        assert_eq!(store.require(&ProductId::new("a1")).unwrap().name, "Widget");
        assert_eq!(
            store.require(&ProductId::new("zz")).unwrap_err(),
            CartError::NotFound("zz".into())
        );
    }

    #[test]
    fn test_reload_notifies() {
        let (mut store, recorder) = store_with_recorder();
        store.add_item(&widget()).unwrap();

        assert_eq!(store.reload(), LoadOutcome::Restored { lines: 1 });
        assert_eq!(recorder.borrow().changes.last(), Some(&CartChange::Reloaded));
    }
}
