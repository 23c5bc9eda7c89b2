//! Actor identity and sign-in/sign-out transitions.

use tokio::sync::watch;

use crate::uuids::TypedUuid;

/// Marker for authenticated account identifiers.
#[derive(Debug)]
pub struct UserRecord;

/// Authenticated account UUID.
pub type UserUuid = TypedUuid<UserRecord>;

/// The actor context that decides which persistence backend owns the cart.
///
/// The in-memory cart is not tied to an identity; on every transition the
/// store reloads from whichever backend the new identity makes
/// authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    /// Visitor with no session; the local store is authoritative.
    #[default]
    Anonymous,
    /// Signed-in account; the remote store is authoritative.
    Authenticated(UserUuid),
}

impl Identity {
    /// The account UUID, when authenticated.
    #[must_use]
    pub fn user(&self) -> Option<UserUuid> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(*user),
        }
    }

    /// True for [`Identity::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Sending half of an identity transition channel, held by the auth
/// subsystem.
pub type IdentityPublisher = watch::Sender<Identity>;

/// Receiving half of an identity transition channel, consumed by
/// [`crate::store::CartStore::watch`].
pub type IdentityWatcher = watch::Receiver<Identity>;

/// Creates a sign-in/sign-out channel seeded with the given identity.
#[must_use]
pub fn identity_channel(initial: Identity) -> (IdentityPublisher, IdentityWatcher) {
    watch::channel(initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_user() {
        assert_eq!(Identity::Anonymous.user(), None);
        assert!(!Identity::Anonymous.is_authenticated());
    }

    #[test]
    fn authenticated_exposes_its_user() {
        let user = UserUuid::new();
        let identity = Identity::Authenticated(user);

        assert_eq!(identity.user(), Some(user));
        assert!(identity.is_authenticated());
    }

    #[tokio::test]
    async fn channel_delivers_transitions_in_order() {
        let (publisher, mut watcher) = identity_channel(Identity::Anonymous);
        let user = UserUuid::new();

        publisher.send(Identity::Authenticated(user)).unwrap();

        assert!(watcher.changed().await.is_ok());
        assert_eq!(*watcher.borrow_and_update(), Identity::Authenticated(user));

        publisher.send(Identity::Anonymous).unwrap();

        assert!(watcher.changed().await.is_ok());
        assert_eq!(*watcher.borrow_and_update(), Identity::Anonymous);
    }
}
