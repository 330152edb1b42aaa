//! Payment benefits
//!
//! Banks and membership programs run day-of-week discounts per supermarket.
//! Once a best store is chosen, the benefits applicable there are split into
//! the one the user can already use (a membership they hold) and the best
//! one worth signing up for (has a referral link). Matching is fuzzy on
//! purpose: membership slugs and benefit entity names come from different
//! catalogs and only agree by substring.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::stores::Store;

/// A day-of-week payment benefit at one supermarket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Benefit {
    /// Data-store identity.
    pub id: u64,

    /// Day of week the benefit applies (0 = Sunday, upstream convention).
    #[serde(rename = "dia_semana")]
    pub day_of_week: u8,

    /// Supermarket name as the benefits catalog spells it.
    #[serde(rename = "supermercado")]
    pub store_name: String,

    /// Issuing entity ("Banco Galicia", "Mercado Pago").
    #[serde(rename = "entidad_nombre")]
    pub entity: String,

    /// Discount fraction (0.25 for 25% off).
    #[serde(rename = "descuento")]
    pub discount: Decimal,

    /// Referral/sign-up link, when the entity has one.
    #[serde(rename = "link_referido", default)]
    pub referral_link: Option<String>,
}

impl Benefit {
    /// Whether this benefit applies at the given store.
    #[must_use]
    pub fn applies_to(&self, store: Store) -> bool {
        normalize(&self.store_name) == store.key()
    }
}

/// A membership the user holds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserMembership {
    /// Program slug ("galicia", "mercadopago").
    pub slug: String,

    /// Program type label ("tarjeta", "billetera").
    #[serde(rename = "tipo")]
    pub kind: String,
}

/// Payment advice for the chosen store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentAdvice {
    /// Highest-discount benefit the user can already use.
    pub owned: Option<Benefit>,

    /// Highest-discount benefit worth signing up for.
    pub recommended: Option<Benefit>,
}

/// Partition the benefits applicable at `store` into owned vs recommended.
///
/// A benefit is "owned" when any of the user's memberships matches its
/// entity by case-insensitive substring or equality, on slug or type.
/// Recommended candidates must carry a referral link. Each side keeps only
/// its highest-discount candidate.
#[must_use]
pub fn payment_advice(
    store: Store,
    benefits: &[Benefit],
    memberships: &[UserMembership],
) -> PaymentAdvice {
    let applicable = benefits.iter().filter(|b| b.applies_to(store));

    let mut owned: Option<&Benefit> = None;
    let mut recommended: Option<&Benefit> = None;

    for benefit in applicable {
        if memberships.iter().any(|m| matches_entity(m, benefit)) {
            replace_if_better(&mut owned, benefit);
        } else if benefit.referral_link.is_some() {
            replace_if_better(&mut recommended, benefit);
        }
    }

    PaymentAdvice {
        owned: owned.cloned(),
        recommended: recommended.cloned(),
    }
}

/// Keep whichever candidate has the larger discount.
fn replace_if_better<'a>(slot: &mut Option<&'a Benefit>, candidate: &'a Benefit) {
    let better = slot.is_none_or(|current| candidate.discount > current.discount);
    if better {
        *slot = Some(candidate);
    }
}

/// Fuzzy membership-to-benefit match: substring either way, on slug or type.
fn matches_entity(membership: &UserMembership, benefit: &Benefit) -> bool {
    let entity = normalize(&benefit.entity);

    [&membership.slug, &membership.kind]
        .into_iter()
        .map(|field| normalize(field))
        .filter(|field| !field.is_empty())
        .any(|field| entity.contains(&field) || field.contains(&entity))
}

/// Lowercase and strip spaces, the way store keys are normalized.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
