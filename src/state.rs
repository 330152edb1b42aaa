//! Application state
//!
//! The device-local state: the working cart, named saved carts, and a couple
//! of UI preferences. The surrounding application owns persistence; this
//! module only defines the snapshot format and the mutations on it. Loading
//! is lenient on purpose, a corrupt snapshot falls back to defaults rather
//! than wedging the app at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::cart::{Cart, CartLine};

/// Errors from saved-cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The subscription tier's saved-cart slot count is exhausted.
    #[error("saved cart limit reached ({limit})")]
    SavedCartLimit {
        /// Slot count for the active tier.
        limit: usize,
    },

    /// No saved cart has the given name.
    #[error("no saved cart named {name:?}")]
    UnknownCart {
        /// The name that was looked up.
        name: String,
    },
}

/// UI color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme, the default.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Subscription tier, which bounds how many carts can be saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier: two saved-cart slots.
    #[default]
    Free,
    /// Paid tier: ten saved-cart slots.
    Pro,
    /// Paid tier, same slot count as Pro.
    Premium,
}

impl SubscriptionTier {
    /// How many saved-cart slots this tier grants.
    #[must_use]
    pub fn max_saved_carts(self) -> usize {
        match self {
            SubscriptionTier::Free => 2,
            SubscriptionTier::Pro | SubscriptionTier::Premium => 10,
        }
    }
}

/// A named snapshot of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCart {
    /// User-chosen name, unique within the state.
    pub name: String,

    /// Creation timestamp as the caller formatted it.
    pub created_at: String,

    /// The cart lines at save time.
    pub lines: Vec<CartLine>,
}

/// The persisted device state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// The working cart.
    #[serde(default)]
    pub cart: Cart,

    /// Saved carts, in save order.
    #[serde(default)]
    pub saved_carts: Vec<SavedCart>,

    /// UI theme preference.
    #[serde(default)]
    pub theme: Theme,

    /// Active subscription tier.
    #[serde(default)]
    pub tier: SubscriptionTier,
}

impl AppState {
    /// Load state from a persisted JSON snapshot.
    ///
    /// A missing or corrupt snapshot yields the default state; the parse
    /// failure is logged, not surfaced.
    #[must_use]
    pub fn from_snapshot(snapshot: &str) -> AppState {
        match serde_json::from_str(snapshot) {
            Ok(state) => state,
            Err(err) => {
                warn!(%err, "discarding unreadable state snapshot");
                AppState::default()
            }
        }
    }

    /// Serialize the state for persistence.
    #[must_use]
    pub fn to_snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Save the working cart under `name`.
    ///
    /// Saving over an existing name replaces that cart without consuming a
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::SavedCartLimit`] when all of the tier's slots
    /// are taken.
    pub fn save_cart(&mut self, name: &str, timestamp: &str) -> Result<(), StateError> {
        let saved = SavedCart {
            name: name.to_owned(),
            created_at: timestamp.to_owned(),
            lines: self.cart.lines().to_vec(),
        };

        if let Some(existing) = self.saved_carts.iter_mut().find(|c| c.name == name) {
            *existing = saved;
            return Ok(());
        }

        let limit = self.tier.max_saved_carts();
        if self.saved_carts.len() >= limit {
            return Err(StateError::SavedCartLimit { limit });
        }

        self.saved_carts.push(saved);
        Ok(())
    }

    /// Delete the saved cart named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCart`] when no saved cart has that name.
    pub fn remove_saved_cart(&mut self, name: &str) -> Result<(), StateError> {
        let before = self.saved_carts.len();
        self.saved_carts.retain(|c| c.name != name);

        if self.saved_carts.len() == before {
            return Err(StateError::UnknownCart { name: name.to_owned() });
        }
        Ok(())
    }

    /// Replace the working cart with the saved cart named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCart`] when no saved cart has that name.
    pub fn restore(&mut self, name: &str) -> Result<(), StateError> {
        let saved = self
            .saved_carts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StateError::UnknownCart { name: name.to_owned() })?;

        self.cart = Cart::with_lines(saved.lines.clone());
        Ok(())
    }
}
