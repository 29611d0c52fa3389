//! Best-effort pricing of `calculated` shipping options.
//!
//! Every qualifying option is priced by an independent request; all requests
//! run concurrently and the batch settles before any result is published.
//! Failed requests are dropped without surfacing an error.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;

use checkout_client::CalculatedPrice;
use checkout_core::ShippingOption;
use futures::future::join_all;
use rust_decimal::Decimal;

/// Resolved amounts for `calculated` options, keyed by option id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatedPriceMap {
    amounts: HashMap<String, Decimal>,
}

impl CalculatedPriceMap {
    #[must_use]
    pub fn get(&self, option_id: &str) -> Option<Decimal> {
        self.amounts.get(option_id).copied()
    }

    #[must_use]
    pub fn contains(&self, option_id: &str) -> bool {
        self.amounts.contains_key(option_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(id, amount)| (id.as_str(), *amount))
    }
}

impl FromIterator<(String, Decimal)> for CalculatedPriceMap {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}

/// Prices every `calculated` option in `options` for `cart_id`.
///
/// `calculate` receives `(option_id, cart_id)`. Entries are keyed by the id
/// the response reports, not the id requested. Responses without an id or
/// amount, and ids that name a `flat` option in `options`, are discarded.
/// Failures contribute nothing; if every request fails the map is empty.
pub async fn resolve_calculated_prices<F, Fut, E>(
    options: &[ShippingOption],
    cart_id: &str,
    calculate: F,
) -> CalculatedPriceMap
where
    F: Fn(String, String) -> Fut,
    Fut: Future<Output = Result<CalculatedPrice, E>>,
    E: Display,
{
    let requested: Vec<&str> = options
        .iter()
        .filter(|o| o.is_calculated())
        .map(|o| o.id.as_str())
        .collect();
    if requested.is_empty() {
        return CalculatedPriceMap::default();
    }

    let flat_ids: HashSet<&str> = options
        .iter()
        .filter(|o| !o.is_calculated())
        .map(|o| o.id.as_str())
        .collect();

    let settled = join_all(
        requested
            .iter()
            .map(|id| calculate((*id).to_owned(), cart_id.to_owned())),
    )
    .await;

    let mut map = CalculatedPriceMap::default();
    for (requested_id, outcome) in requested.iter().zip(settled) {
        let price = match outcome {
            Ok(price) => price,
            Err(error) => {
                tracing::debug!(
                    option_id = requested_id,
                    cart_id,
                    %error,
                    "shipping price calculation failed"
                );
                continue;
            }
        };

        let (Some(id), Some(amount)) = (price.id.filter(|id| !id.is_empty()), price.amount)
        else {
            tracing::debug!(
                option_id = requested_id,
                "calculated price response missing id or amount"
            );
            continue;
        };

        if flat_ids.contains(id.as_str()) {
            tracing::debug!(
                option_id = requested_id,
                response_id = %id,
                "calculated price response named a flat option"
            );
            continue;
        }

        map.amounts.insert(id, amount);
    }
    map
}

/// Identifies one price-resolution batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchTicket(u64);

/// Sequences price batches so only the latest one may publish.
#[derive(Debug, Default)]
pub struct PriceBatches {
    latest: u64,
    in_flight: bool,
}

impl PriceBatches {
    /// Starts a new batch, superseding any outstanding one.
    pub fn begin(&mut self) -> BatchTicket {
        self.latest = self.latest.wrapping_add(1);
        self.in_flight = true;
        BatchTicket(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, ticket: BatchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Marks `ticket` settled. Returns `false` for a superseded batch, whose
    /// result must be discarded.
    pub fn finish(&mut self, ticket: BatchTicket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale price batch"
            );
            return false;
        }
        self.in_flight = false;
        true
    }

    /// `true` while the latest batch has not settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use checkout_core::PriceType;

    use super::*;

    fn option(id: &str, price_type: PriceType) -> ShippingOption {
        ShippingOption {
            id: id.to_string(),
            name: id.to_string(),
            seller_id: Some("S1".to_string()),
            seller_name: None,
            price_type,
            amount: (price_type == PriceType::Flat).then_some(Decimal::from(500)),
            service_zone: None,
        }
    }

    #[tokio::test]
    async fn keeps_successes_and_drops_failures() {
        let options = vec![
            option("O1", PriceType::Calculated),
            option("O2", PriceType::Calculated),
        ];

        let map = resolve_calculated_prices(&options, "cart_1", |id, _cart| async move {
            if id == "O1" {
                Ok(CalculatedPrice::new("O1", Decimal::from(1200)))
            } else {
                Err("carrier unavailable")
            }
        })
        .await;

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("O1"), Some(Decimal::from(1200)));
        assert!(!map.contains("O2"));
    }

    #[tokio::test]
    async fn never_queries_flat_options() {
        let calls = RefCell::new(Vec::new());
        let options = vec![
            option("F1", PriceType::Flat),
            option("C1", PriceType::Calculated),
        ];

        let map = resolve_calculated_prices(&options, "cart_1", |id, cart| {
            calls.borrow_mut().push((id.clone(), cart));
            async move { Ok::<_, String>(CalculatedPrice::new(&id, Decimal::from(300))) }
        })
        .await;

        assert_eq!(
            calls.into_inner(),
            vec![("C1".to_string(), "cart_1".to_string())]
        );
        assert!(!map.contains("F1"));
        assert_eq!(map.get("C1"), Some(Decimal::from(300)));
    }

    #[tokio::test]
    async fn all_failures_yield_empty_map() {
        let options = vec![
            option("C1", PriceType::Calculated),
            option("C2", PriceType::Calculated),
        ];

        let map = resolve_calculated_prices(&options, "cart_1", |_id, _cart| async {
            Err::<CalculatedPrice, _>("timeout")
        })
        .await;

        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn keys_by_response_id_and_drops_unusable_responses() {
        let options = vec![
            option("C1", PriceType::Calculated),
            option("C2", PriceType::Calculated),
            option("C3", PriceType::Calculated),
            option("F1", PriceType::Flat),
            option("C4", PriceType::Calculated),
        ];

        let map = resolve_calculated_prices(&options, "cart_1", |id, _cart| async move {
            let price = match id.as_str() {
                "C1" => CalculatedPrice::new("C1-renamed", Decimal::from(10)),
                "C2" => CalculatedPrice {
                    id: None,
                    amount: Some(Decimal::from(20)),
                },
                "C3" => CalculatedPrice {
                    id: Some("C3".to_string()),
                    amount: None,
                },
                "C4" => CalculatedPrice::new("F1", Decimal::from(40)),
                _ => unreachable!("flat option was queried"),
            };
            Ok::<_, String>(price)
        })
        .await;

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("C1-renamed"), Some(Decimal::from(10)));
        assert!(!map.contains(""));
        assert!(!map.contains("F1"));
    }

    #[tokio::test]
    async fn no_calculated_options_skips_requests() {
        let calls = Cell::new(0_u32);
        let options = vec![option("F1", PriceType::Flat)];

        let map = resolve_calculated_prices(&options, "cart_1", |id, _cart| {
            calls.set(calls.get() + 1);
            async move { Ok::<_, String>(CalculatedPrice::new(&id, Decimal::ZERO)) }
        })
        .await;

        assert_eq!(calls.get(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn only_latest_batch_may_finish() {
        let mut batches = PriceBatches::default();
        let first = batches.begin();
        let second = batches.begin();

        assert!(batches.is_loading());
        assert!(!batches.finish(first));
        assert!(batches.is_loading());
        assert!(batches.finish(second));
        assert!(!batches.is_loading());
    }
}
