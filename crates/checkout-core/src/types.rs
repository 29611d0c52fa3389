//! Cart and shipping-option shapes as returned by the storefront backend.
//!
//! Only the fields the delivery step reads are modelled; unknown fields are
//! ignored on deserialization. Every nested reference that the backend may
//! omit (product, seller, service zone, amount) is an `Option` so callers
//! handle absence explicitly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfillment-set classification that marks an option as in-store pickup.
pub const PICKUP_FULFILLMENT_TYPE: &str = "pickup";

/// The merchant fulfilling a subset of a cart's line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub seller: Option<Seller>,
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub product: Option<Product>,
}

impl CartLineItem {
    /// Seller of the line item's product, if both references are present.
    #[must_use]
    pub fn seller(&self) -> Option<&Seller> {
        self.product.as_ref().and_then(|p| p.seller.as_ref())
    }
}

fn default_quantity() -> u32 {
    1
}

/// A shipping method the cart has committed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedShippingMethod {
    pub id: String,
    #[serde(default)]
    pub shipping_option_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub shipping_methods: Vec<SelectedShippingMethod>,
}

impl Cart {
    /// `true` once at least one shipping method has been committed.
    #[must_use]
    pub fn has_shipping_methods(&self) -> bool {
        !self.shipping_methods.is_empty()
    }
}

/// How a shipping option's amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Amount is known up front and carried on the option.
    Flat,
    /// Amount requires a per-cart calculation request.
    Calculated,
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceType::Flat => write!(f, "flat"),
            PriceType::Calculated => write!(f, "calculated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentSet {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceZone {
    #[serde(default)]
    pub fulfillment_set: Option<FulfillmentSet>,
}

/// A purchasable shipping method offered for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    /// Absent for platform-wide options.
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    pub price_type: PriceType,
    /// Present when `price_type` is [`PriceType::Flat`].
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub service_zone: Option<ServiceZone>,
}

impl ShippingOption {
    /// `true` when the option's fulfillment set is classified as pickup.
    #[must_use]
    pub fn is_pickup(&self) -> bool {
        self.service_zone
            .as_ref()
            .and_then(|z| z.fulfillment_set.as_ref())
            .is_some_and(|set| set.kind == PICKUP_FULFILLMENT_TYPE)
    }

    #[must_use]
    pub fn is_calculated(&self) -> bool {
        self.price_type == PriceType::Calculated
    }
}

/// Filters out pickup options, leaving the ones the delivery step offers.
#[must_use]
pub fn delivery_options(options: &[ShippingOption]) -> Vec<ShippingOption> {
    options.iter().filter(|o| !o.is_pickup()).cloned().collect()
}
