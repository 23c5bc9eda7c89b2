//! Cart persistence seam.

mod local;
mod remote;

pub use local::JsonCartPersistence;
pub use remote::{PgCartPersistence, VariantAxis};

use async_trait::async_trait;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use inkcart_core::Cart;

use crate::identity::Identity;

/// Cart persistence errors.
#[derive(Debug, Error)]
pub enum CartPersistenceError {
    #[error("backend requires an authenticated identity")]
    IdentityRequired,

    #[error("no remote backend is configured")]
    RemoteUnavailable,

    #[error("variant axis {axis:?} cannot be stored remotely")]
    UnsupportedAxis { axis: String },

    #[error("cart line already stored")]
    DuplicateLine,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("failed to access cart file")]
    Io(#[from] std::io::Error),

    #[error("malformed cart data")]
    Malformed(#[source] serde_json::Error),
}

impl From<sqlx::Error> for CartPersistenceError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateLine,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// A durable store holding the complete cart for one actor.
///
/// Every persisted mutation is a whole-cart overwrite: `replace_cart`
/// replaces whatever the backend held for the identity with exactly the
/// given cart, atomically.
#[automock]
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Load the persisted cart for the given identity.
    async fn load_cart(&self, identity: &Identity) -> Result<Cart, CartPersistenceError>;

    /// Overwrite the persisted cart for the given identity.
    async fn replace_cart(
        &self,
        identity: &Identity,
        cart: &Cart,
    ) -> Result<(), CartPersistenceError>;
}
