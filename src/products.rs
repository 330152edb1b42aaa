//! Products
//!
//! The in-memory product shape and the ingestion boundary that produces it.
//! Upstream rows are duck-typed: prices may be numbers or strings, and the
//! `outliers` / `oferta_gondola` columns may hold JSON text or an
//! already-parsed object. All of that is resolved here, once; no core
//! computation ever sees the raw forms.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{sanitize::sanitize_price, stores::Store};

/// Per-store listing for a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Promotional price as scraped. Zero means no promotional price.
    pub promo_price: Decimal,

    /// Regular (list) price as scraped. Zero means unknown.
    pub regular_price: Decimal,

    /// Product page URL at this store.
    pub url: String,

    /// Whether the store reports the product in stock.
    pub stock: bool,
}

impl Listing {
    /// The price this store effectively charges per unit: the promotional
    /// price when present, otherwise the regular price.
    #[must_use]
    pub fn price(&self) -> Decimal {
        if self.promo_price > Decimal::ZERO {
            self.promo_price
        } else {
            self.regular_price
        }
    }

    /// Whether the URL looks like a real product page rather than a
    /// placeholder.
    #[must_use]
    pub fn has_plausible_url(&self) -> bool {
        self.url.len() > 5 && self.url != "#"
    }

    /// Whether this listing can participate in comparisons: positive price,
    /// plausible URL, in stock, and not flagged as an outlier.
    #[must_use]
    pub fn is_usable(&self, outlier: bool) -> bool {
        self.price() > Decimal::ZERO && self.has_plausible_url() && self.stock && !outlier
    }
}

/// One grocery item with its per-store data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    /// Data-store identity.
    pub id: u64,

    /// Canonical name, also the key into the price history.
    pub name: String,

    /// Optional short display code.
    pub ticker: Option<String>,

    /// Category string as stored upstream ("Carnes", "verdu", ...).
    pub category: String,

    /// Whether the product may be listed at all.
    pub visible: bool,

    /// Per-store listings. Absence means "not sold there".
    pub listings: FxHashMap<Store, Listing>,

    /// Shelf promotion labels by store ("3x2", "2da al 70%").
    pub shelf_offers: FxHashMap<Store, String>,

    /// Outlier flags by store, as computed by
    /// [`detect_outliers`](crate::outliers::detect_outliers).
    pub outliers: FxHashMap<Store, bool>,
}

impl Product {
    /// Listing for a store, if the product is sold there.
    #[must_use]
    pub fn listing(&self, store: Store) -> Option<&Listing> {
        self.listings.get(&store)
    }

    /// Whether the store's price for this product is flagged as an outlier.
    #[must_use]
    pub fn is_outlier(&self, store: Store) -> bool {
        self.outliers.get(&store).copied().unwrap_or(false)
    }

    /// Shelf offer label for a store, if any.
    #[must_use]
    pub fn shelf_offer(&self, store: Store) -> Option<&str> {
        self.shelf_offers.get(&store).map(String::as_str)
    }

    /// Stores with a usable listing for this product.
    pub fn usable_stores(&self) -> impl Iterator<Item = Store> + '_ {
        Store::ALL.into_iter().filter(|&store| {
            self.listing(store)
                .is_some_and(|l| l.is_usable(self.is_outlier(store)))
        })
    }

    /// Minimum usable per-unit price across stores.
    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.usable_stores()
            .filter_map(|store| self.listing(store).map(Listing::price))
            .min()
    }

    /// Average usable per-unit price across stores.
    #[must_use]
    pub fn avg_price(&self) -> Option<Decimal> {
        let prices: Vec<Decimal> = self
            .usable_stores()
            .filter_map(|store| self.listing(store).map(Listing::price))
            .collect();

        let count = Decimal::from(prices.len());
        if count.is_zero() {
            return None;
        }

        let sum: Decimal = prices.iter().sum();
        Some((sum / count).round_dp(2))
    }

    /// Normalize a raw data-store row into the canonical in-memory shape.
    #[must_use]
    pub fn from_raw(row: &RawProductRow) -> Product {
        let mut listings = FxHashMap::default();

        for store in Store::ALL {
            let promo_price = sanitize_price(row.field("p", store));
            let regular_price = sanitize_price(row.field("pr", store));
            let url = row
                .field("url", store)
                .as_str()
                .unwrap_or_default()
                .to_owned();
            // A missing stock column means in stock; only an explicit
            // `false` marks the product unavailable.
            let stock = row.field("stock", store).as_bool() != Some(false);

            if promo_price > Decimal::ZERO || regular_price > Decimal::ZERO || !url.is_empty() {
                listings.insert(
                    store,
                    Listing {
                        promo_price,
                        regular_price,
                        url,
                        stock,
                    },
                );
            }
        }

        Product {
            id: row.id,
            name: row.nombre.clone(),
            ticker: row.ticker.clone(),
            category: row.categoria.clone(),
            visible: row.visible_web != Some(false),
            listings,
            shelf_offers: parse_offer_map(&row.oferta_gondola),
            outliers: parse_outlier_map(&row.outliers),
        }
    }
}

/// A product row as the external data store hands it over.
///
/// Field names mirror the upstream schema; the per-store columns
/// (`p_coto`, `pr_coto`, `url_coto`, `stock_coto`, ...) land in `fields`
/// and are resolved against [`Store::ALL`] by [`Product::from_raw`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawProductRow {
    /// Numeric product id.
    pub id: u64,

    /// Product name.
    pub nombre: String,

    /// Optional short display code.
    #[serde(default)]
    pub ticker: Option<String>,

    /// Category string.
    #[serde(default)]
    pub categoria: String,

    /// Visibility flag; missing means visible.
    #[serde(default)]
    pub visible_web: Option<bool>,

    /// Shelf offer labels: JSON text or object keyed by store.
    #[serde(default)]
    pub oferta_gondola: Value,

    /// Persisted outlier flags: JSON text or object keyed by store.
    #[serde(default)]
    pub outliers: Value,

    /// The remaining per-store columns.
    #[serde(flatten)]
    pub fields: FxHashMap<String, Value>,
}

impl RawProductRow {
    /// Look up a suffixed per-store column (`{prefix}_{store key}`).
    fn field(&self, prefix: &str, store: Store) -> &Value {
        self.fields
            .get(&format!("{prefix}_{}", store.key()))
            .unwrap_or(&Value::Null)
    }
}

/// Flatten the `oferta_gondola` column into store-keyed labels.
///
/// Accepts JSON text or an object; values are either plain label strings or
/// `{"etiqueta": "..."}` objects. Labels with no recognisable store key are
/// dropped: a label that names no store cannot feed a per-store total.
fn parse_offer_map(raw: &Value) -> FxHashMap<Store, String> {
    let parsed = decode_json_column(raw);

    let mut offers = FxHashMap::default();
    if let Some(map) = parsed.as_object() {
        for (key, value) in map {
            let Some(store) = Store::from_key(key) else {
                continue;
            };
            let label = match value {
                Value::String(s) => Some(s.clone()),
                Value::Object(o) => o
                    .get("etiqueta")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
                _ => None,
            };
            if let Some(label) = label.filter(|l| !l.is_empty()) {
                offers.insert(store, label);
            }
        }
    }

    offers
}

/// Decode the persisted `outliers` column into store-keyed flags.
fn parse_outlier_map(raw: &Value) -> FxHashMap<Store, bool> {
    let parsed = decode_json_column(raw);

    let mut flags = FxHashMap::default();
    if let Some(map) = parsed.as_object() {
        for (key, value) in map {
            if let (Some(store), Some(flag)) = (Store::from_key(key), value.as_bool()) {
                flags.insert(store, flag);
            }
        }
    }

    flags
}

/// Columns that are "JSON, possibly serialized as text": parse the text form
/// when present, treat unparseable text as absent.
fn decode_json_column(raw: &Value) -> Value {
    match raw {
        Value::String(s) => serde_json::from_str(s).unwrap_or(Value::Null),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn raw_row(extra: Value) -> Result<RawProductRow, serde_json::Error> {
        let mut base = json!({
            "id": 7,
            "nombre": "Yerba 1kg",
            "categoria": "Varios",
        });
        if let (Some(base_map), Some(extra_map)) = (base.as_object_mut(), extra.as_object()) {
            for (k, v) in extra_map {
                base_map.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(base)
    }

    #[test]
    fn from_raw_resolves_per_store_columns() -> TestResult {
        let row = raw_row(json!({
            "p_coto": "1.234,56",
            "pr_coto": 1500,
            "url_coto": "https://coto.example/yerba",
            "stock_coto": true,
            "p_jumbo": 0,
        }))?;

        let product = Product::from_raw(&row);
        let coto = product.listing(Store::Coto).expect("missing coto listing");

        assert_eq!(coto.promo_price, Decimal::new(123_456, 2));
        assert_eq!(coto.regular_price, Decimal::from(1500));
        assert!(coto.stock);
        assert!(product.listing(Store::Jumbo).is_none());
        assert!(product.listing(Store::Dia).is_none());

        Ok(())
    }

    #[test]
    fn missing_stock_column_means_in_stock() -> TestResult {
        let row = raw_row(json!({
            "p_dia": 800,
            "url_dia": "https://dia.example/yerba",
        }))?;

        let product = Product::from_raw(&row);
        let dia = product.listing(Store::Dia).expect("missing dia listing");

        assert!(dia.stock);
        assert!(dia.is_usable(false));

        Ok(())
    }

    #[test]
    fn outliers_accept_string_and_object_forms() -> TestResult {
        let as_text = raw_row(json!({ "outliers": "{\"coto\": true, \"dia\": false}" }))?;
        let as_object = raw_row(json!({ "outliers": { "coto": true, "dia": false } }))?;

        for row in [as_text, as_object] {
            let product = Product::from_raw(&row);
            assert!(product.is_outlier(Store::Coto));
            assert!(!product.is_outlier(Store::Dia));
            assert!(!product.is_outlier(Store::Vea));
        }

        Ok(())
    }

    #[test]
    fn shelf_offers_flatten_etiqueta_objects() -> TestResult {
        let row = raw_row(json!({
            "oferta_gondola": {
                "COTO": "3x2",
                "jumbo": { "etiqueta": "2da al 70%" },
                "carrefour": { "otra_clave": "x" },
            }
        }))?;

        let product = Product::from_raw(&row);

        assert_eq!(product.shelf_offer(Store::Coto), Some("3x2"));
        assert_eq!(product.shelf_offer(Store::Jumbo), Some("2da al 70%"));
        assert_eq!(product.shelf_offer(Store::Carrefour), None);

        Ok(())
    }

    #[test]
    fn corrupt_offer_json_means_no_offers() -> TestResult {
        let row = raw_row(json!({ "oferta_gondola": "{not json" }))?;

        let product = Product::from_raw(&row);

        assert!(product.shelf_offers.is_empty());

        Ok(())
    }

    #[test]
    fn listing_usability_requires_url_stock_and_price() {
        let listing = Listing {
            promo_price: Decimal::from(100),
            regular_price: Decimal::from(150),
            url: "https://store.example/item".into(),
            stock: true,
        };

        assert!(listing.is_usable(false));
        assert!(!listing.is_usable(true));

        let placeholder = Listing {
            url: "#".into(),
            ..listing.clone()
        };
        assert!(!placeholder.is_usable(false));

        let out_of_stock = Listing {
            stock: false,
            ..listing.clone()
        };
        assert!(!out_of_stock.is_usable(false));

        let unpriced = Listing {
            promo_price: Decimal::ZERO,
            regular_price: Decimal::ZERO,
            ..listing
        };
        assert!(!unpriced.is_usable(false));
    }

    #[test]
    fn min_and_avg_skip_unusable_listings() -> TestResult {
        let row = raw_row(json!({
            "p_coto": 100,
            "url_coto": "https://coto.example/a",
            "p_dia": 200,
            "url_dia": "https://dia.example/a",
            "p_jumbo": 50,
            "url_jumbo": "#",
        }))?;

        let product = Product::from_raw(&row);

        // Jumbo's placeholder URL keeps its cheap price out of both figures.
        assert_eq!(product.min_price(), Some(Decimal::from(100)));
        assert_eq!(product.avg_price(), Some(Decimal::from(150).round_dp(2)));

        Ok(())
    }
}
