//! Product and custom-order panel logic.
//!
//! Handlers never talk to the store directly. They go through
//! [`PanelService`], which keeps the last good listing of each kind in a
//! [`ListingCache`] so a failed read shows stale rows and a notice instead
//! of an empty table.

use tokio::sync::RwLock;

use tudobacana_core::{CustomOrder, Product, ProductDraft, ProductId};

use crate::db::RepositoryError;
use crate::models::Notice;

pub const LOAD_PRODUCTS_FAILED: &str = "Erro ao carregar produtos";
pub const LOAD_ORDERS_FAILED: &str = "Erro ao carregar pedidos";
pub const SAVE_FAILED: &str = "Erro ao salvar produto";
pub const DELETE_FAILED: &str = "Erro ao excluir produto";
pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";
pub const PRODUCT_DELETED: &str = "Produto excluído!";

/// Persistence operations the panel needs.
pub trait CatalogStore: Sync {
    /// Every product, newest first.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Every custom-order request, newest first.
    fn list_custom_orders(
        &self,
    ) -> impl Future<Output = Result<Vec<CustomOrder>, RepositoryError>> + Send;

    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    fn insert_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Fails with `RepositoryError::NotFound` for an unknown ID.
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Fails with `RepositoryError::NotFound` for an unknown ID.
    fn delete_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Last successfully loaded listings, shared by every panel request.
#[derive(Debug, Default)]
pub struct ListingCache {
    products: RwLock<Vec<Product>>,
    custom_orders: RwLock<Vec<CustomOrder>>,
}

impl ListingCache {
    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn custom_orders(&self) -> Vec<CustomOrder> {
        self.custom_orders.read().await.clone()
    }
}

/// What a panel page renders.
#[derive(Debug, Clone, Default)]
pub struct PanelListing {
    pub products: Vec<Product>,
    pub custom_orders: Vec<CustomOrder>,
    /// Load failures to show as toasts.
    pub notices: Vec<Notice>,
}

/// Whether a save inserts or overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(ProductId),
}

impl SaveTarget {
    /// Toast shown after a successful save.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Produto adicionado!",
            Self::Update(_) => "Produto atualizado!",
        }
    }
}

/// Result of a delete request.
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    /// The user did not confirm. The store was not touched.
    Cancelled,
    /// The product is gone. `products` is the list read again afterwards.
    Deleted {
        products: Vec<Product>,
        notice: Option<Notice>,
    },
}

/// Panel operations over a [`CatalogStore`].
pub struct PanelService<'a, S> {
    store: &'a S,
    cache: &'a ListingCache,
}

impl<'a, S: CatalogStore> PanelService<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S, cache: &'a ListingCache) -> Self {
        Self { store, cache }
    }

    /// Load both listings concurrently.
    ///
    /// A listing that fails to load falls back to its cached snapshot and
    /// adds a notice. The other listing is unaffected.
    pub async fn load(&self) -> PanelListing {
        let ((products, products_notice), (custom_orders, orders_notice)) =
            tokio::join!(self.reload_products(), self.reload_custom_orders());

        PanelListing {
            products,
            custom_orders,
            notices: products_notice.into_iter().chain(orders_notice).collect(),
        }
    }

    /// Read the product list again, updating the cache on success.
    pub async fn reload_products(&self) -> (Vec<Product>, Option<Notice>) {
        match self.store.list_products().await {
            Ok(products) => {
                self.cache.products.write().await.clone_from(&products);
                (products, None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                (
                    self.cache.products().await,
                    Some(Notice::error(LOAD_PRODUCTS_FAILED)),
                )
            }
        }
    }

    async fn reload_custom_orders(&self) -> (Vec<CustomOrder>, Option<Notice>) {
        match self.store.list_custom_orders().await {
            Ok(custom_orders) => {
                self.cache
                    .custom_orders
                    .write()
                    .await
                    .clone_from(&custom_orders);
                (custom_orders, None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load custom orders");
                (
                    self.cache.custom_orders().await,
                    Some(Notice::error(LOAD_ORDERS_FAILED)),
                )
            }
        }
    }

    /// Fetch one product for the edit form.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.store.get_product(id).await
    }

    /// Insert or update a product. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when updating an unknown ID, or
    /// the store error for any other failure.
    pub async fn save(
        &self,
        target: SaveTarget,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let saved = match target {
            SaveTarget::Create => self.store.insert_product(draft).await?,
            SaveTarget::Update(id) => self.store.update_product(id, draft).await?,
        };

        tracing::info!(
            product_id = %saved.id,
            name = %saved.name,
            created = matches!(target, SaveTarget::Create),
            "Product saved"
        );
        Ok(saved)
    }

    /// Delete a product once the user has confirmed.
    ///
    /// Without confirmation the store is never called.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID, or the store
    /// error for any other failure.
    pub async fn delete(
        &self,
        id: ProductId,
        confirmed: bool,
    ) -> Result<DeleteOutcome, RepositoryError> {
        if !confirmed {
            tracing::debug!(product_id = %id, "Delete not confirmed");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.delete_product(id).await?;
        tracing::info!(product_id = %id, "Product deleted");

        let (products, notice) = self.reload_products().await;
        Ok(DeleteOutcome::Deleted { products, notice })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use tudobacana_core::{Category, CustomOrderId, Price, ProductInput};

    use super::*;

    /// In-memory store with switchable failures and call counters.
    #[derive(Default)]
    struct MemoryCatalog {
        products: Mutex<Vec<Product>>,
        custom_orders: Mutex<Vec<CustomOrder>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        product_reads: AtomicUsize,
        deletes: AtomicUsize,
    }

    fn outage() -> RepositoryError {
        RepositoryError::Database(sqlx::Error::PoolTimedOut)
    }

    impl MemoryCatalog {
        fn with_products(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(products),
                ..Self::default()
            }
        }

        fn read_guard(&self) -> Result<(), RepositoryError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(outage());
            }
            Ok(())
        }

        fn write_guard(&self) -> Result<(), RepositoryError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(outage());
            }
            Ok(())
        }

        fn len(&self) -> usize {
            self.products.lock().unwrap().len()
        }
    }

    impl CatalogStore for MemoryCatalog {
        async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
            self.product_reads.fetch_add(1, Ordering::SeqCst);
            self.read_guard()?;
            Ok(self.products.lock().unwrap().clone())
        }

        async fn list_custom_orders(&self) -> Result<Vec<CustomOrder>, RepositoryError> {
            self.read_guard()?;
            Ok(self.custom_orders.lock().unwrap().clone())
        }

        async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.read_guard()?;
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
            self.write_guard()?;
            let product = Product {
                id: ProductId::new(Uuid::new_v4()),
                name: draft.name.clone(),
                price: draft.price,
                category: draft.category.clone(),
                image_url: draft.image_url.clone(),
                description: draft.description.clone(),
                active: draft.active,
                created_at: Utc::now(),
            };
            self.products.lock().unwrap().insert(0, product.clone());
            Ok(product)
        }

        async fn update_product(
            &self,
            id: ProductId,
            draft: &ProductDraft,
        ) -> Result<Product, RepositoryError> {
            self.write_guard()?;
            let mut products = self.products.lock().unwrap();
            let product = products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepositoryError::NotFound)?;
            product.name.clone_from(&draft.name);
            product.price = draft.price;
            product.category = draft.category.clone();
            product.image_url.clone_from(&draft.image_url);
            product.description.clone_from(&draft.description);
            product.active = draft.active;
            Ok(product.clone())
        }

        async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.write_guard()?;
            let mut products = self.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.id != id);
            if products.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn product(n: u128, name: &str) -> Product {
        Product {
            id: ProductId::from_u128(n),
            name: name.to_string(),
            price: Price::parse("89,90").unwrap(),
            category: Category::new("Bowls").unwrap(),
            image_url: None,
            description: None,
            active: true,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
                - Duration::days(i64::try_from(n).unwrap()),
        }
    }

    fn custom_order(n: u128) -> CustomOrder {
        CustomOrder {
            id: CustomOrderId::from_u128(n),
            name: "Joana".to_string(),
            email: "joana@example.com".to_string(),
            whatsapp: None,
            description: "Jogo de xícaras com alça larga".to_string(),
            status: "pendente".to_string(),
            created_at: Utc::now(),
        }
    }

    fn draft(category: &str, custom: &str) -> ProductDraft {
        ProductDraft::parse(&ProductInput {
            name: "Luminária Argila",
            price: "210",
            category,
            custom_category: custom,
            image_url: "",
            description: "",
            active: true,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_fills_cache() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl"), product(2, "Vaso")]);
        store.custom_orders.lock().unwrap().push(custom_order(1));
        let cache = ListingCache::default();

        let listing = PanelService::new(&store, &cache).load().await;

        assert_eq!(listing.products.len(), 2);
        assert_eq!(listing.custom_orders.len(), 1);
        assert!(listing.notices.is_empty());
        assert_eq!(cache.products().await.len(), 2);
        assert_eq!(cache.custom_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl")]);
        store.custom_orders.lock().unwrap().push(custom_order(1));
        let cache = ListingCache::default();
        let panel = PanelService::new(&store, &cache);
        panel.load().await;

        store.products.lock().unwrap().clear();
        store.fail_reads.store(true, Ordering::SeqCst);
        let listing = panel.load().await;

        assert_eq!(listing.products, vec![product(1, "Bowl")]);
        assert_eq!(listing.custom_orders.len(), 1);
        assert_eq!(
            listing.notices,
            vec![
                Notice::error(LOAD_PRODUCTS_FAILED),
                Notice::error(LOAD_ORDERS_FAILED)
            ]
        );
    }

    #[tokio::test]
    async fn test_first_failed_load_is_empty_with_notice() {
        let store = MemoryCatalog::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        let cache = ListingCache::default();

        let listing = PanelService::new(&store, &cache).load().await;

        assert!(listing.products.is_empty());
        assert_eq!(listing.notices.len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_reload_shows_new_product_first() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl")]);
        let cache = ListingCache::default();
        let panel = PanelService::new(&store, &cache);

        let saved = panel
            .save(SaveTarget::Create, &draft("Canecas", ""))
            .await
            .unwrap();
        let listing = panel.load().await;

        assert_eq!(listing.products.first().unwrap().id, saved.id);
        assert_eq!(listing.products.len(), 2);
        assert_eq!(SaveTarget::Create.success_message(), "Produto adicionado!");
    }

    #[tokio::test]
    async fn test_other_category_stores_custom_label() {
        let store = MemoryCatalog::default();
        let cache = ListingCache::default();

        let saved = PanelService::new(&store, &cache)
            .save(SaveTarget::Create, &draft("Outros", "  Luminárias "))
            .await
            .unwrap();

        assert_eq!(saved.category.as_str(), "Luminárias");
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl")]);
        let cache = ListingCache::default();
        let panel = PanelService::new(&store, &cache);

        let target = SaveTarget::Update(ProductId::from_u128(1));
        let updated = panel.save(target, &draft("Vasos", "")).await.unwrap();
        assert_eq!(updated.name, "Luminária Argila");
        assert_eq!(updated.category.as_str(), "Vasos");
        assert_eq!(target.success_message(), "Produto atualizado!");

        let missing = panel
            .save(
                SaveTarget::Update(ProductId::from_u128(99)),
                &draft("Vasos", ""),
            )
            .await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_failed_save_is_reported() {
        let store = MemoryCatalog::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        let cache = ListingCache::default();

        let result = PanelService::new(&store, &cache)
            .save(SaveTarget::Create, &draft("Pratos", ""))
            .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_leaves_store_untouched() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl"), product(2, "Vaso")]);
        let cache = ListingCache::default();

        let outcome = PanelService::new(&store, &cache)
            .delete(ProductId::from_u128(1), false)
            .await
            .unwrap();

        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
        assert_eq!(store.product_reads.load(Ordering::SeqCst), 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_one_and_refetches() {
        let store = MemoryCatalog::with_products(vec![
            product(1, "Bowl"),
            product(2, "Vaso"),
            product(3, "Caneca"),
        ]);
        let cache = ListingCache::default();

        let outcome = PanelService::new(&store, &cache)
            .delete(ProductId::from_u128(2), true)
            .await
            .unwrap();

        let DeleteOutcome::Deleted { products, notice } = outcome else {
            panic!("expected a deletion");
        };
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(store.product_reads.load(Ordering::SeqCst), 1);
        assert_eq!(
            products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Bowl", "Caneca"]
        );
        assert!(notice.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let store = MemoryCatalog::with_products(vec![product(1, "Bowl")]);
        let cache = ListingCache::default();

        let result = PanelService::new(&store, &cache)
            .delete(ProductId::from_u128(7), true)
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(store.len(), 1);
    }
}
