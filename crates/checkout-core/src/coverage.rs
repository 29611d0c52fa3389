//! Detects sellers in the cart that no delivery option covers.
//!
//! Coverage is decided by exact seller-id match only. A platform-wide option
//! (no `seller_id`) never covers a seller, and a line item without a product
//! or seller reference never contributes a seller.

use std::collections::HashSet;

use crate::types::{CartLineItem, ShippingOption};

pub const NOTICE_HEADING: &str = "Missing seller shipping option";
pub const NOTICE_TITLE: &str = "Some of the sellers in your cart do not have shipping options.";
/// Where the blocking notice sends the shopper when dismissed.
pub const NOTICE_CLOSE_HREF: &str = "/cart";

/// Result of comparing cart sellers against delivery-option sellers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerCoverage {
    /// Seller ids in the cart with no matching option, in first-seen order.
    pub missing_seller_ids: Vec<String>,
    /// Whether the blocking notice should be shown.
    pub should_prompt: bool,
}

impl SellerCoverage {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_seller_ids.is_empty()
    }
}

/// Computes which cart sellers have no delivery option.
///
/// Pickup options are excluded before comparing. The prompt is suppressed
/// once the cart already has a confirmed shipping method.
#[must_use]
pub fn compute_missing_sellers(
    items: &[CartLineItem],
    options: &[ShippingOption],
    has_confirmed_shipping_methods: bool,
) -> SellerCoverage {
    let covered: HashSet<&str> = options
        .iter()
        .filter(|o| !o.is_pickup())
        .filter_map(|o| o.seller_id.as_deref())
        .collect();

    let mut seen = HashSet::new();
    let missing_seller_ids: Vec<String> = items
        .iter()
        .filter_map(CartLineItem::seller)
        .map(|s| s.id.as_str())
        .filter(|id| seen.insert(*id))
        .filter(|id| !covered.contains(id))
        .map(str::to_owned)
        .collect();

    let should_prompt = !missing_seller_ids.is_empty() && !has_confirmed_shipping_methods;

    SellerCoverage {
        missing_seller_ids,
        should_prompt,
    }
}

/// Display names for the missing sellers, in cart order and de-duplicated.
#[must_use]
pub fn missing_seller_names(items: &[CartLineItem], coverage: &SellerCoverage) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(CartLineItem::seller)
        .filter(|s| coverage.missing_seller_ids.contains(&s.id))
        .filter(|s| seen.insert(s.id.as_str()))
        .map(|s| s.name.clone())
        .collect()
}

/// Copy for the blocking "missing seller" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSellerNotice {
    pub seller_names: Vec<String>,
}

impl MissingSellerNotice {
    /// Builds the notice when `coverage` asks for a prompt.
    #[must_use]
    pub fn from_coverage(items: &[CartLineItem], coverage: &SellerCoverage) -> Option<Self> {
        if !coverage.should_prompt {
            return None;
        }
        Some(Self {
            seller_names: missing_seller_names(items, coverage),
        })
    }

    #[must_use]
    pub fn heading(&self) -> &'static str {
        NOTICE_HEADING
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        NOTICE_TITLE
    }

    /// "him" for exactly one seller, "them" otherwise.
    #[must_use]
    pub fn pronoun(&self) -> &'static str {
        if self.seller_names.len() == 1 {
            "him"
        } else {
            "them"
        }
    }

    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Please remove the {} items or contact {} to get the shipping options.",
            self.seller_names.join(", "),
            self.pronoun()
        )
    }

    /// Full notice text: title followed by body.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} {}", self.title(), self.body())
    }

    #[must_use]
    pub fn close_href(&self) -> &'static str {
        NOTICE_CLOSE_HREF
    }
}

#[cfg(test)]
#[path = "coverage_test.rs"]
mod tests;
