use std::sync::Arc;

use clap::Args;
use uuid::Uuid;

use inkcart_app::{
    config::{DatabaseConfig, LocalStoreConfig},
    database::{self, Db},
    identity::{Identity, UserUuid},
    notify::TracingNotifier,
    persistence::{JsonCartPersistence, PgCartPersistence},
    store::CartStore,
};

/// Which cart a command operates on: an authenticated account's remote cart
/// or the local cart file.
#[derive(Debug, Args)]
pub(crate) struct TargetArgs {
    /// Authenticated account UUID; omit to operate on the local cart file
    #[arg(long)]
    user: Option<Uuid>,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    local: LocalStoreConfig,
}

impl TargetArgs {
    pub(crate) async fn open_store(&self) -> Result<CartStore, String> {
        let local = Arc::new(JsonCartPersistence::new(self.local.cart_file.clone()));
        let notifier = Arc::new(TracingNotifier);

        let mut store = match &self.database.database_url {
            Some(url) => {
                let pool = database::connect(url)
                    .await
                    .map_err(|error| format!("failed to connect to database: {error}"))?;

                CartStore::new(
                    local,
                    Arc::new(PgCartPersistence::new(Db::new(pool))),
                    notifier,
                )
            }
            None => {
                if self.user.is_some() {
                    return Err(
                        "--user requires --database-url (or DATABASE_URL)".to_string()
                    );
                }

                CartStore::local_only(local, notifier)
            }
        };

        match self.user {
            Some(user) => {
                store
                    .set_identity(Identity::Authenticated(UserUuid::from_uuid(user)))
                    .await;
            }
            None => store.load().await,
        }

        Ok(store)
    }
}
