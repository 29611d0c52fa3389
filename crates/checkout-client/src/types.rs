//! Response envelopes for the store API endpoints the delivery step calls.

use checkout_core::{Cart, ShippingOption};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `{ "cart": ... }`, returned by cart reads and by adding a shipping method.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub cart: Cart,
}

/// `GET /store/shipping-options?cart_id=...`
#[derive(Debug, Deserialize)]
pub struct ShippingOptionsResponse {
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
}

/// `POST /store/shipping-options/{id}/calculate`
#[derive(Debug, Deserialize)]
pub struct CalculatedOptionResponse {
    pub shipping_option: CalculatedPrice,
}

/// Dynamically computed price for one shipping option.
///
/// Both fields are optional on the wire; consumers discard entries missing
/// either one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedPrice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl CalculatedPrice {
    #[must_use]
    pub fn new(id: &str, amount: Decimal) -> Self {
        Self {
            id: Some(id.to_owned()),
            amount: Some(amount),
        }
    }
}

/// Error body shape: `{ "type": "...", "message": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CalculateRequest<'a> {
    pub cart_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddShippingMethodRequest<'a> {
    pub option_id: &'a str,
}
