//! Checkout step carried in the `step` query parameter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query parameter that selects the active checkout step.
pub const STEP_PARAM: &str = "step";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Address,
    Delivery,
    Payment,
    Review,
}

impl CheckoutStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutStep::Address => "address",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
        }
    }

    /// Reads the step from a raw query-parameter value; unknown values yield `None`.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }

    /// Whether the delivery selection is editable at this step.
    #[must_use]
    pub fn shows_delivery_editor(step: Option<Self>) -> bool {
        step == Some(CheckoutStep::Delivery)
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckoutStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(CheckoutStep::Address),
            "delivery" => Ok(CheckoutStep::Delivery),
            "payment" => Ok(CheckoutStep::Payment),
            "review" => Ok(CheckoutStep::Review),
            other => Err(format!("unknown checkout step: {other}")),
        }
    }
}

/// Builds `<pathname>?step=<step>`.
#[must_use]
pub fn step_href(pathname: &str, step: CheckoutStep) -> String {
    format!("{pathname}?{STEP_PARAM}={step}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_steps() {
        assert_eq!(
            CheckoutStep::from_param(Some("delivery")),
            Some(CheckoutStep::Delivery)
        );
        assert_eq!(
            CheckoutStep::from_param(Some("payment")),
            Some(CheckoutStep::Payment)
        );
    }

    #[test]
    fn unknown_or_missing_step_is_none() {
        assert_eq!(CheckoutStep::from_param(Some("Delivery")), None);
        assert_eq!(CheckoutStep::from_param(None), None);
    }

    #[test]
    fn only_delivery_shows_editor() {
        assert!(CheckoutStep::shows_delivery_editor(Some(CheckoutStep::Delivery)));
        assert!(!CheckoutStep::shows_delivery_editor(Some(CheckoutStep::Payment)));
        assert!(!CheckoutStep::shows_delivery_editor(None));
    }

    #[test]
    fn step_href_appends_query() {
        assert_eq!(
            step_href("/checkout", CheckoutStep::Payment),
            "/checkout?step=payment"
        );
    }
}
