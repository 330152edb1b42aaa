//! Stores
//!
//! The closed set of supermarkets the engine compares. Upstream rows address
//! stores through suffixed column names (`p_coto`, `url_jumbo`, ...); those
//! are resolved to this enum once, at ingestion, so everything downstream is
//! statically keyed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported supermarket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    /// Coto Digital
    Coto,
    /// Carrefour Argentina
    Carrefour,
    /// Dia Online
    Dia,
    /// Jumbo
    Jumbo,
    /// MasOnline (Changomas)
    MasOnline,
    /// Disco
    Disco,
    /// Vea Digital
    Vea,
}

impl Store {
    /// All supported stores, in the order comparisons are reported.
    ///
    /// Ranking ties preserve this order.
    pub const ALL: [Store; 7] = [
        Store::Coto,
        Store::Carrefour,
        Store::Dia,
        Store::Jumbo,
        Store::MasOnline,
        Store::Disco,
        Store::Vea,
    ];

    /// Normalized store key: lowercase, no spaces.
    ///
    /// Matches the column suffixes and the keys of the persisted outlier and
    /// shelf-offer maps.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Store::Coto => "coto",
            Store::Carrefour => "carrefour",
            Store::Dia => "dia",
            Store::Jumbo => "jumbo",
            Store::MasOnline => "masonline",
            Store::Disco => "disco",
            Store::Vea => "vea",
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Store::Coto => "COTO",
            Store::Carrefour => "CARREFOUR",
            Store::Dia => "DIA",
            Store::Jumbo => "JUMBO",
            Store::MasOnline => "MAS ONLINE",
            Store::Disco => "DISCO",
            Store::Vea => "VEA",
        }
    }

    /// Resolve a free-form store key ("COTO", "Mas Online", "masonline").
    ///
    /// Lowercases and strips spaces before matching, so the upstream map keys
    /// and display names both resolve.
    #[must_use]
    pub fn from_key(raw: &str) -> Option<Store> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        Store::ALL
            .into_iter()
            .find(|store| store.key() == normalized)
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
