//! State owner for the delivery step of the checkout.
//!
//! `DeliverySection` holds everything the step derives from its inputs (the
//! cart and the offered shipping options): seller coverage, resolved prices,
//! the selection state machine, and the active checkout step. Nothing else
//! writes this state.

use checkout_core::{
    compute_missing_sellers, delivery_options, format_amount, group_by_seller, step_href, Cart,
    CheckoutStep, MissingSellerNotice, SellerCoverage, ShippingOption,
};

use crate::backend::ShippingBackend;
use crate::prices::{resolve_calculated_prices, BatchTicket, CalculatedPriceMap, PriceBatches};
use crate::selection::ShippingSelection;
use crate::view::{
    DeliveryMode, DeliveryView, MethodSummary, OptionView, PriceDisplay, SellerGroupView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Adds a history entry.
    Push,
    /// Replaces the current history entry.
    Replace,
}

/// A step change the host router should apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    pub mode: NavigationMode,
}

/// Work for one price batch, detached from the section so it can run while
/// the section stays usable.
#[derive(Debug, Clone)]
pub struct PriceRefresh {
    ticket: BatchTicket,
    cart_id: String,
    options: Vec<ShippingOption>,
}

impl PriceRefresh {
    #[must_use]
    pub fn ticket(&self) -> BatchTicket {
        self.ticket
    }

    /// Issues every calculation request in the batch and waits for all of them.
    pub async fn resolve<B: ShippingBackend>(&self, backend: &B) -> CalculatedPriceMap {
        resolve_calculated_prices(&self.options, &self.cart_id, |option_id, cart_id| async move {
            backend.calculate_price(&option_id, &cart_id).await
        })
        .await
    }
}

#[derive(Debug)]
pub struct DeliverySection {
    pathname: String,
    step: Option<CheckoutStep>,
    cart: Cart,
    options: Vec<ShippingOption>,
    coverage: SellerCoverage,
    prices: CalculatedPriceMap,
    batches: PriceBatches,
    selection: ShippingSelection,
}

impl DeliverySection {
    /// Builds the section. `available` is every option the backend offers
    /// (pickup included); `None` means options have not loaded.
    #[must_use]
    pub fn new(
        pathname: &str,
        step: Option<CheckoutStep>,
        cart: Cart,
        available: Option<&[ShippingOption]>,
    ) -> Self {
        let options = available.map(delivery_options).unwrap_or_default();
        let coverage =
            compute_missing_sellers(&cart.items, &options, cart.has_shipping_methods());
        Self {
            pathname: pathname.to_owned(),
            step,
            cart,
            options,
            coverage,
            prices: CalculatedPriceMap::default(),
            batches: PriceBatches::default(),
            selection: ShippingSelection::default(),
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Offered options minus pickup.
    #[must_use]
    pub fn options(&self) -> &[ShippingOption] {
        &self.options
    }

    #[must_use]
    pub fn coverage(&self) -> &SellerCoverage {
        &self.coverage
    }

    #[must_use]
    pub fn prices(&self) -> &CalculatedPriceMap {
        &self.prices
    }

    #[must_use]
    pub fn selection(&self) -> &ShippingSelection {
        &self.selection
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        CheckoutStep::shows_delivery_editor(self.step)
    }

    /// Replaces the inputs. Returns `true` when prices must be re-resolved
    /// (the option list or the cart id changed).
    pub fn update_inputs(&mut self, cart: Cart, available: Option<&[ShippingOption]>) -> bool {
        let options = available.map(delivery_options).unwrap_or_default();
        let stale = options != self.options || cart.id != self.cart.id;
        self.options = options;
        self.replace_cart(cart);
        stale
    }

    /// Applies a new `step` query value. Opening or closing the editor clears
    /// any displayed error.
    pub fn set_step(&mut self, step: Option<CheckoutStep>) {
        let was_open = self.is_open();
        self.step = step;
        if was_open != self.is_open() {
            self.selection.clear_error();
        }
    }

    /// Starts a new price batch, superseding any outstanding one.
    ///
    /// Returns `None` when there is nothing to calculate; the price map is
    /// then cleared so no stale amount survives an input change.
    pub fn begin_price_refresh(&mut self) -> Option<PriceRefresh> {
        let ticket = self.batches.begin();
        if !self.options.iter().any(ShippingOption::is_calculated) {
            self.complete_price_refresh(ticket, CalculatedPriceMap::default());
            return None;
        }
        Some(PriceRefresh {
            ticket,
            cart_id: self.cart.id.clone(),
            options: self.options.clone(),
        })
    }

    /// Publishes a settled batch. A superseded batch is discarded and `false`
    /// is returned.
    pub fn complete_price_refresh(
        &mut self,
        ticket: BatchTicket,
        prices: CalculatedPriceMap,
    ) -> bool {
        if !self.batches.finish(ticket) {
            return false;
        }
        self.prices = prices;
        true
    }

    /// Resolves prices for the current inputs and publishes them.
    pub async fn refresh_prices<B: ShippingBackend>(&mut self, backend: &B) {
        let Some(refresh) = self.begin_price_refresh() else {
            return;
        };
        let prices = refresh.resolve(backend).await;
        self.complete_price_refresh(refresh.ticket(), prices);
    }

    /// Commits `option_id` to the cart. An empty selection sends nothing.
    ///
    /// On success the backend's cart replaces the section's cart; on failure
    /// the error message is kept for display and nothing is retried.
    pub async fn select<B: ShippingBackend>(&mut self, backend: &B, option_id: Option<&str>) {
        let Some(option_id) = self.selection.begin(option_id) else {
            return;
        };

        match backend.set_shipping_method(&self.cart.id, &option_id).await {
            Ok(cart) => {
                tracing::info!(cart_id = %cart.id, option_id = %option_id, "shipping method set");
                self.selection.succeed();
                self.replace_cart(cart);
            }
            Err(error) => {
                tracing::warn!(
                    cart_id = %self.cart.id,
                    option_id = %option_id,
                    %error,
                    "failed to set shipping method"
                );
                self.selection.fail(&error);
            }
        }
    }

    /// Moves to the payment step. `None` while no method is confirmed.
    pub fn continue_to_payment(&mut self) -> Option<Navigation> {
        if !self.cart.has_shipping_methods() {
            return None;
        }
        self.set_step(Some(CheckoutStep::Payment));
        Some(Navigation {
            href: step_href(&self.pathname, CheckoutStep::Payment),
            mode: NavigationMode::Push,
        })
    }

    /// Re-opens the delivery step.
    pub fn edit(&mut self) -> Navigation {
        self.set_step(Some(CheckoutStep::Delivery));
        Navigation {
            href: step_href(&self.pathname, CheckoutStep::Delivery),
            mode: NavigationMode::Replace,
        }
    }

    #[must_use]
    pub fn view(&self) -> DeliveryView {
        let blocking_notice = MissingSellerNotice::from_coverage(&self.cart.items, &self.coverage);
        let confirmed = self.confirmed_methods();

        if !self.is_open() {
            return DeliveryView {
                blocking_notice,
                completed: !confirmed.is_empty(),
                mode: DeliveryMode::Summary { confirmed },
            };
        }

        let loading = self.is_loading();
        let groups = group_by_seller(&self.options)
            .iter()
            .map(|group| SellerGroupView {
                key: group.key.clone(),
                heading: group.heading(),
                options: group
                    .options
                    .iter()
                    .map(|option| OptionView {
                        id: option.id.clone(),
                        name: option.name.clone(),
                        price: self.price_display(option, loading),
                    })
                    .collect(),
            })
            .collect();

        DeliveryView {
            blocking_notice,
            completed: false,
            mode: DeliveryMode::Editing {
                groups,
                can_continue: !confirmed.is_empty(),
                confirmed,
                error: self.selection.error().map(str::to_owned),
                loading,
            },
        }
    }

    fn is_loading(&self) -> bool {
        self.selection.is_submitting() || self.batches.is_loading()
    }

    fn price_display(&self, option: &ShippingOption, loading: bool) -> PriceDisplay {
        let amount = if option.is_calculated() {
            self.prices.get(&option.id)
        } else {
            option.amount
        };
        match amount {
            Some(amount) => PriceDisplay::Amount(format_amount(amount, &self.cart.currency_code)),
            None if loading && option.is_calculated() => PriceDisplay::Loading,
            None => PriceDisplay::Unavailable,
        }
    }

    fn confirmed_methods(&self) -> Vec<MethodSummary> {
        self.cart
            .shipping_methods
            .iter()
            .map(|method| MethodSummary {
                id: method.id.clone(),
                name: method.name.clone(),
                amount: method
                    .amount
                    .map(|amount| format_amount(amount, &self.cart.currency_code)),
            })
            .collect()
    }

    fn replace_cart(&mut self, cart: Cart) {
        self.coverage =
            compute_missing_sellers(&cart.items, &self.options, cart.has_shipping_methods());
        self.cart = cart;
    }
}

#[cfg(test)]
#[path = "section_test.rs"]
mod tests;
