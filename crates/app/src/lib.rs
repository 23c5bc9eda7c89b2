//! Cart persistence and reconciliation for the inkcart storefront.
//!
//! The [`store::CartStore`] is the single source of truth for the current
//! actor's cart; it routes every read and write to either the anonymous
//! file-backed store or the authenticated `PostgreSQL` store, based on the
//! current [`identity::Identity`].

pub mod checkout;
pub mod config;
pub mod database;
pub mod identity;
pub mod notify;
pub mod persistence;
pub mod store;

mod uuids;

pub use uuids::TypedUuid;
