//! File-backed cart persistence for anonymous visitors.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;

use inkcart_core::{Cart, LineItem};

use crate::identity::Identity;

use super::{CartPersistence, CartPersistenceError};

/// Cart store keeping one JSON array of line items in a single file — the
/// server-side analog of the storefront's browser-local storage.
///
/// There is no versioning scheme for the stored shape; unreadable data
/// surfaces as [`CartPersistenceError::Malformed`] and callers degrade to an
/// empty cart.
#[derive(Debug, Clone)]
pub struct JsonCartPersistence {
    path: PathBuf,
}

impl JsonCartPersistence {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_lines(&self) -> Result<Vec<LineItem>, CartPersistenceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // A cart that was never saved is an empty cart, not an error.
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        serde_json::from_slice(&bytes).map_err(CartPersistenceError::Malformed)
    }

    async fn write_lines(&self, items: &[LineItem]) -> Result<(), CartPersistenceError> {
        let json = serde_json::to_vec_pretty(items).map_err(CartPersistenceError::Malformed)?;

        // Write-then-rename so a crash mid-write cannot leave a torn file.
        let staging = self.path.with_extension("tmp");

        fs::write(&staging, json).await?;
        fs::rename(&staging, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl CartPersistence for JsonCartPersistence {
    async fn load_cart(&self, _identity: &Identity) -> Result<Cart, CartPersistenceError> {
        let lines = self.read_lines().await?;

        Ok(Cart::from_items(lines))
    }

    async fn replace_cart(
        &self,
        _identity: &Identity,
        cart: &Cart,
    ) -> Result<(), CartPersistenceError> {
        self.write_lines(cart.items()).await
    }
}

#[cfg(test)]
mod tests {
    use inkcart_core::{Price, ProductId, VariantSelections};
    use testresult::TestResult;

    use super::*;

    fn line(product: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(product),
            name: product.to_string(),
            unit_price: Price::new(1500),
            quantity,
            image: Some("thumb.png".to_string()),
            supplier_id: None,
            variants: VariantSelections::new()
                .with("color", "red")
                .with("finish", "matte"),
        }
    }

    fn store(dir: &tempfile::TempDir) -> JsonCartPersistence {
        JsonCartPersistence::new(dir.path().join("cart.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        let cart = store(&dir).load_cart(&Identity::Anonymous).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn round_trips_arbitrary_variant_axes() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store(&dir);

        let cart = Cart::from_items([line("poster", 2), line("mug", 1)]);

        store.replace_cart(&Identity::Anonymous, &cart).await?;
        let loaded = store.load_cart(&Identity::Anonymous).await?;

        assert_eq!(loaded, cart);
        assert_eq!(loaded.items()[0].variants.get("finish"), Some("matte"));

        Ok(())
    }

    #[tokio::test]
    async fn replace_overwrites_previous_contents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store(&dir);

        store
            .replace_cart(&Identity::Anonymous, &Cart::from_items([line("poster", 2)]))
            .await?;
        store
            .replace_cart(&Identity::Anonymous, &Cart::from_items([line("mug", 1)]))
            .await?;

        let loaded = store.load_cart(&Identity::Anonymous).await?;

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items()[0].product_id, ProductId::new("mug"));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_as_malformed() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store(&dir);

        tokio::fs::write(store.path(), b"{not json").await?;

        let result = store.load_cart(&Identity::Anonymous).await;

        assert!(
            matches!(result, Err(CartPersistenceError::Malformed(_))),
            "expected Malformed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stored_duplicates_merge_on_load() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store(&dir);

        let duplicated = [line("poster", 2), line("poster", 3)];
        tokio::fs::write(store.path(), serde_json::to_vec(&duplicated)?).await?;

        let loaded = store.load_cart(&Identity::Anonymous).await?;

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items()[0].quantity, 5);

        Ok(())
    }
}
