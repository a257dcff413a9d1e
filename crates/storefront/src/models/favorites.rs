//! Favorite products for the current visit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use tudobacana_core::ProductId;

use super::session_keys;

/// Product IDs the visitor has hearted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<ProductId>);

impl FavoriteSet {
    /// Flip membership of `id`. Returns `true` when it is now a favorite.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the set from the session. A missing or unreadable entry is an
    /// empty set.
    pub async fn load(session: &Session) -> Self {
        match session.get::<Self>(session_keys::FAVORITES).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites from session");
                Self::default()
            }
        }
    }

    /// Write the set back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::FAVORITES, self).await
    }

    /// Forget every favorite. A full page load starts from an empty set.
    pub async fn clear(session: &Session) {
        if let Err(e) = session.remove_value(session_keys::FAVORITES).await {
            tracing::warn!(error = %e, "Failed to clear favorites from session");
        }
    }
}
