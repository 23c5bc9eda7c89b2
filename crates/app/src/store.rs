//! Cart store: single source of truth for the current actor's cart.

use std::sync::Arc;

use tracing::warn;

use inkcart_core::{Cart, CartSummary, InsertOutcome, LineItem, LineKey, Price, ProductId};

use crate::{
    checkout::CheckoutDraft,
    identity::{Identity, IdentityWatcher},
    notify::{Notice, Notifier},
    persistence::{CartPersistence, CartPersistenceError},
};

/// Mediates between storefront actions and the persistence backends.
///
/// Exactly one backend is authoritative at a time, chosen by the current
/// [`Identity`]: the local store while anonymous, the remote store while
/// authenticated. Every mutation updates the in-memory cart first and then
/// overwrites the authoritative backend with the full cart.
///
/// Mutations take `&mut self`, so callers issue them serially; there is no
/// internal queue and no retry policy — a failed write is reported once.
pub struct CartStore {
    cart: Cart,
    identity: Identity,
    local: Arc<dyn CartPersistence>,
    remote: Option<Arc<dyn CartPersistence>>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates a store with both backends, starting anonymous and empty.
    pub fn new(
        local: Arc<dyn CartPersistence>,
        remote: Arc<dyn CartPersistence>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cart: Cart::new(),
            identity: Identity::Anonymous,
            local,
            remote: Some(remote),
            notifier,
        }
    }

    /// Creates a store with no remote backend.
    ///
    /// Authenticated identities then fail persistence with
    /// [`CartPersistenceError::RemoteUnavailable`].
    pub fn local_only(local: Arc<dyn CartPersistence>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            cart: Cart::new(),
            identity: Identity::Anonymous,
            local,
            remote: None,
            notifier,
        }
    }

    /// The current identity.
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// The lines of the in-memory cart.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Total price of the in-memory cart. Never touches a backend.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Line, unit, and price totals of the in-memory cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Packages the current cart for the external payment flow.
    #[must_use]
    pub fn checkout_draft(&self) -> CheckoutDraft {
        CheckoutDraft::from_cart(&self.cart)
    }

    fn backend(&self) -> Result<&Arc<dyn CartPersistence>, CartPersistenceError> {
        match self.identity {
            Identity::Anonymous => Ok(&self.local),
            Identity::Authenticated(_) => self
                .remote
                .as_ref()
                .ok_or(CartPersistenceError::RemoteUnavailable),
        }
    }

    /// Loads the cart for the current identity from the authoritative
    /// backend.
    ///
    /// Failures never propagate: the store degrades to an empty cart, logs
    /// the error, and surfaces a notice, so the session always continues.
    pub async fn load(&mut self) {
        let loaded = match self.backend() {
            Ok(backend) => backend.load_cart(&self.identity).await,
            Err(error) => Err(error),
        };

        self.cart = match loaded {
            Ok(cart) => cart,
            Err(error) => {
                warn!(%error, "failed to load cart, starting empty");
                self.notifier
                    .notify(Notice::error("Your cart could not be loaded."));

                Cart::new()
            }
        };
    }

    /// Adds an item, merging with an existing line on identity-key
    /// collision, and persists the cart.
    ///
    /// A zero-quantity item is rejected as a no-op.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when the write fails. The in-memory
    /// cart keeps the item either way; only the stored copy is stale.
    pub async fn add_item(&mut self, item: LineItem) -> Result<(), CartPersistenceError> {
        let name = item.name.clone();

        if self.cart.insert(item) == InsertOutcome::Rejected {
            return Ok(());
        }

        self.persist(Notice::success(format!("{name} added to your cart.")))
            .await
    }

    /// Sets the quantity of the line with the given key and persists.
    ///
    /// Quantities below one are rejected as a silent no-op, as are unknown
    /// keys; neither touches a backend.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when the write fails.
    pub async fn update_quantity(
        &mut self,
        key: &LineKey,
        quantity: u32,
    ) -> Result<(), CartPersistenceError> {
        if !self.cart.set_quantity(key, quantity) {
            return Ok(());
        }

        self.persist(Notice::success("Cart updated.")).await
    }

    /// Removes the line with the given identity key and persists.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when the write fails.
    pub async fn remove_item(&mut self, key: &LineKey) -> Result<(), CartPersistenceError> {
        if !self.cart.remove(key) {
            return Ok(());
        }

        self.persist(Notice::success("Item removed from your cart."))
            .await
    }

    /// Removes every line for the given product, regardless of variants,
    /// and persists.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when the write fails.
    pub async fn remove_product(
        &mut self,
        product_id: &ProductId,
    ) -> Result<(), CartPersistenceError> {
        if self.cart.remove_product(product_id) == 0 {
            return Ok(());
        }

        self.persist(Notice::success("Item removed from your cart."))
            .await
    }

    /// Empties the cart and persists the empty collection.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when the write fails.
    pub async fn clear(&mut self) -> Result<(), CartPersistenceError> {
        self.cart.clear();

        self.persist(Notice::success("Cart cleared.")).await
    }

    /// Called by the payment flow once payment is confirmed.
    ///
    /// # Errors
    ///
    /// Returns the persistence error when clearing the stored cart fails.
    pub async fn complete_checkout(&mut self) -> Result<(), CartPersistenceError> {
        self.cart.clear();

        self.persist(Notice::success("Order placed — thank you!"))
            .await
    }

    /// Switches to the given identity and reloads from its backend.
    ///
    /// The previous in-memory cart is discarded, never merged: items added
    /// while anonymous are not carried into an authenticated session, and
    /// vice versa.
    pub async fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
        self.load().await;
    }

    /// Drives identity transitions from a sign-in/sign-out channel until
    /// the publishing side is dropped.
    pub async fn watch(&mut self, mut watcher: IdentityWatcher) {
        while watcher.changed().await.is_ok() {
            let identity = *watcher.borrow_and_update();
            self.set_identity(identity).await;
        }
    }

    async fn persist(&mut self, on_success: Notice) -> Result<(), CartPersistenceError> {
        let result = match self.backend() {
            Ok(backend) => backend.replace_cart(&self.identity, &self.cart).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(()) => {
                self.notifier.notify(on_success);

                Ok(())
            }
            Err(error) => {
                // In-memory state is kept; only the stored copy is stale.
                warn!(%error, "failed to persist cart");
                self.notifier
                    .notify(Notice::error("Your cart could not be saved."));

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use inkcart_core::{Price, VariantSelections};

    use crate::{
        identity::{UserUuid, identity_channel},
        notify::MockNotifier,
        persistence::MockCartPersistence,
    };

    use super::*;

    fn item(product: &str, color: &str, price: u64, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(product),
            name: product.to_string(),
            unit_price: Price::new(price),
            quantity,
            image: None,
            supplier_id: None,
            variants: VariantSelections::new().with("color", color),
        }
    }

    fn quiet_notifier() -> Arc<dyn Notifier> {
        let mut notifier = MockNotifier::new();

        notifier.expect_notify().return_const(());

        Arc::new(notifier)
    }

    fn saving_local() -> MockCartPersistence {
        let mut local = MockCartPersistence::new();

        local.expect_replace_cart().returning(|_, _| Ok(()));

        local
    }

    fn store_with_local(local: MockCartPersistence) -> CartStore {
        CartStore::local_only(Arc::new(local), quiet_notifier())
    }

    #[tokio::test]
    async fn add_item_merges_same_identity_key() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 2)).await?;
        store.add_item(item("tote", "red", 1000, 3)).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_keeps_distinct_variants_apart() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 1)).await?;
        store.add_item(item("tote", "blue", 1000, 1)).await?;

        assert_eq!(store.items().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_persists_the_full_cart() -> TestResult {
        let mut local = MockCartPersistence::new();

        local
            .expect_replace_cart()
            .once()
            .withf(|identity, cart| {
                *identity == Identity::Anonymous
                    && cart.len() == 1
                    && cart.items()[0].quantity == 2
            })
            .returning(|_, _| Ok(()));

        let mut store = store_with_local(local);

        store.add_item(item("tote", "red", 1000, 2)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_save_keeps_in_memory_state_and_notifies() {
        let mut local = MockCartPersistence::new();

        local
            .expect_replace_cart()
            .returning(|_, _| Err(CartPersistenceError::Sql(sqlx::Error::PoolClosed)));

        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify()
            .once()
            .withf(|notice| notice == &Notice::error("Your cart could not be saved."))
            .return_const(());

        let mut store = CartStore::local_only(Arc::new(local), Arc::new(notifier));

        let result = store.add_item(item("tote", "red", 1000, 2)).await;

        assert!(result.is_err(), "expected the persistence error to surface");
        assert_eq!(store.items().len(), 1, "in-memory cart must keep the item");
    }

    #[tokio::test]
    async fn failed_load_degrades_to_empty_cart() {
        let mut local = MockCartPersistence::new();

        local
            .expect_load_cart()
            .returning(|_| Err(CartPersistenceError::Sql(sqlx::Error::PoolClosed)));

        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify()
            .once()
            .withf(|notice| notice == &Notice::error("Your cart could not be loaded."))
            .return_const(());

        let mut store = CartStore::local_only(Arc::new(local), Arc::new(notifier));

        store.load().await;

        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn update_quantity_below_one_never_touches_the_backend() -> TestResult {
        let mut local = saving_local();

        local.expect_load_cart().never();

        let mut store = store_with_local(local);

        store.add_item(item("tote", "red", 1000, 2)).await?;
        let key = store.items()[0].key();

        // The single expected replace_cart call was consumed by add_item.
        let mut strict_local = MockCartPersistence::new();
        strict_local.expect_replace_cart().never();

        store.local = Arc::new(strict_local);

        store.update_quantity(&key, 0).await?;

        assert_eq!(store.items()[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_sets_and_persists() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 2)).await?;
        let key = store.items()[0].key();

        store.update_quantity(&key, 7).await?;

        assert_eq!(store.items()[0].quantity, 7);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_targets_the_exact_variant() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 1)).await?;
        store.add_item(item("tote", "blue", 1000, 1)).await?;

        let red = LineKey::new("tote", VariantSelections::new().with("color", "red"));

        store.remove_item(&red).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].variants.get("color"), Some("blue"));

        Ok(())
    }

    #[tokio::test]
    async fn remove_product_drops_every_variant() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 1)).await?;
        store.add_item(item("tote", "blue", 1000, 1)).await?;
        store.add_item(item("mug", "white", 900, 1)).await?;

        store.remove_product(&ProductId::new("tote")).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].product_id, ProductId::new("mug"));

        Ok(())
    }

    #[tokio::test]
    async fn clear_twice_is_idempotent_and_error_free() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 2)).await?;

        store.clear().await?;
        store.clear().await?;

        assert!(store.items().is_empty());
        assert_eq!(store.total_price(), Price::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn total_price_reflects_every_mutation() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 2)).await?;
        store.add_item(item("mug", "white", 550, 3)).await?;

        assert_eq!(store.total_price(), Price::new(3650));

        let key = store.items()[0].key();
        store.update_quantity(&key, 1).await?;

        assert_eq!(store.total_price(), Price::new(2650));

        Ok(())
    }

    #[tokio::test]
    async fn sign_in_discards_the_anonymous_cart() -> TestResult {
        let user = UserUuid::new();

        let mut remote = MockCartPersistence::new();

        remote
            .expect_load_cart()
            .once()
            .withf(move |identity| *identity == Identity::Authenticated(user))
            .returning(|_| Ok(Cart::new()));

        let mut store = CartStore::new(
            Arc::new(saving_local()),
            Arc::new(remote),
            quiet_notifier(),
        );

        store.add_item(item("tote", "red", 1000, 2)).await?;
        assert_eq!(store.items().len(), 1);

        store.set_identity(Identity::Authenticated(user)).await;

        assert!(
            store.items().is_empty(),
            "anonymous items must not leak into the authenticated cart"
        );

        Ok(())
    }

    #[tokio::test]
    async fn sign_out_reloads_the_local_cart() -> TestResult {
        let user = UserUuid::new();

        let mut local = MockCartPersistence::new();

        local
            .expect_load_cart()
            .returning(|_| Ok(Cart::from_items([item("poster", "green", 700, 1)])));
        local.expect_replace_cart().returning(|_, _| Ok(()));

        let mut remote = MockCartPersistence::new();

        remote.expect_load_cart().returning(|_| Ok(Cart::new()));
        remote.expect_replace_cart().returning(|_, _| Ok(()));

        let mut store = CartStore::new(Arc::new(local), Arc::new(remote), quiet_notifier());

        store.set_identity(Identity::Authenticated(user)).await;
        store.add_item(item("tote", "red", 1000, 2)).await?;

        store.set_identity(Identity::Anonymous).await;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].product_id, ProductId::new("poster"));

        Ok(())
    }

    #[tokio::test]
    async fn authenticated_writes_go_to_the_remote_backend() -> TestResult {
        let user = UserUuid::new();

        let mut local = MockCartPersistence::new();

        local.expect_replace_cart().never();

        let mut remote = MockCartPersistence::new();

        remote.expect_load_cart().returning(|_| Ok(Cart::new()));
        remote
            .expect_replace_cart()
            .once()
            .withf(move |identity, _| *identity == Identity::Authenticated(user))
            .returning(|_, _| Ok(()));

        let mut store = CartStore::new(Arc::new(local), Arc::new(remote), quiet_notifier());

        store.set_identity(Identity::Authenticated(user)).await;
        store.add_item(item("tote", "red", 1000, 2)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn authenticated_without_remote_backend_fails_the_save() {
        let mut store = store_with_local(saving_local());

        store
            .set_identity(Identity::Authenticated(UserUuid::new()))
            .await;

        let result = store.add_item(item("tote", "red", 1000, 1)).await;

        assert!(
            matches!(result, Err(CartPersistenceError::RemoteUnavailable)),
            "expected RemoteUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn watch_follows_identity_transitions() -> TestResult {
        let user = UserUuid::new();

        let mut local = saving_local();
        local.expect_load_cart().returning(|_| Ok(Cart::new()));

        let mut remote = MockCartPersistence::new();

        remote
            .expect_load_cart()
            .once()
            .returning(|_| Ok(Cart::from_items([item("cap", "black", 1200, 1)])));

        let mut store = CartStore::new(Arc::new(local), Arc::new(remote), quiet_notifier());

        let (publisher, watcher) = identity_channel(Identity::Anonymous);

        publisher.send(Identity::Authenticated(user))?;
        drop(publisher);

        store.watch(watcher).await;

        assert_eq!(store.identity(), Identity::Authenticated(user));
        assert_eq!(store.items().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn complete_checkout_empties_and_persists() -> TestResult {
        let mut store = store_with_local(saving_local());

        store.add_item(item("tote", "red", 1000, 2)).await?;

        let draft = store.checkout_draft();

        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.total, Price::new(2000));

        store.complete_checkout().await?;

        assert!(store.items().is_empty());

        Ok(())
    }
}
