//! Render model for the delivery step.

use checkout_core::{MissingSellerNotice, SellerKey};

/// Placeholder shown when a price is unknown.
pub const PRICE_PLACEHOLDER: &str = "-";
/// Text stand-in for a loading spinner.
pub const PRICE_LOADING: &str = "…";

/// What the price slot of an option shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceDisplay {
    Amount(String),
    Loading,
    Unavailable,
}

impl std::fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceDisplay::Amount(text) => f.write_str(text),
            PriceDisplay::Loading => f.write_str(PRICE_LOADING),
            PriceDisplay::Unavailable => f.write_str(PRICE_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub id: String,
    pub name: String,
    pub price: PriceDisplay,
}

impl OptionView {
    /// `"<name> - <price>"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.price)
    }
}

/// One seller's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerGroupView {
    pub key: SellerKey,
    pub heading: String,
    pub options: Vec<OptionView>,
}

/// A shipping method the cart has already committed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSummary {
    pub id: String,
    pub name: String,
    pub amount: Option<String>,
}

impl MethodSummary {
    /// `"<name> <amount>"`, or just the name when the amount is unknown.
    #[must_use]
    pub fn line(&self) -> String {
        match &self.amount {
            Some(amount) => format!("{} {amount}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// The `delivery` step: selectors per seller plus the continue action.
    Editing {
        groups: Vec<SellerGroupView>,
        confirmed: Vec<MethodSummary>,
        error: Option<String>,
        can_continue: bool,
        loading: bool,
    },
    /// Any other step: read-only list of confirmed methods.
    Summary { confirmed: Vec<MethodSummary> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryView {
    pub blocking_notice: Option<MissingSellerNotice>,
    /// Step is closed and at least one method is confirmed.
    pub completed: bool,
    pub mode: DeliveryMode,
}

impl DeliveryView {
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DeliveryMode::Editing { .. })
    }
}
