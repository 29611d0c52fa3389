use std::future::Future;

use checkout_client::{CalculatedPrice, ClientError, StorefrontClient};
use checkout_core::Cart;

/// Backend operations the delivery step depends on.
pub trait ShippingBackend {
    /// Prices one `calculated` shipping option for a cart.
    fn calculate_price(
        &self,
        option_id: &str,
        cart_id: &str,
    ) -> impl Future<Output = Result<CalculatedPrice, ClientError>>;

    /// Commits a shipping option to the cart, returning the updated cart.
    fn set_shipping_method(
        &self,
        cart_id: &str,
        option_id: &str,
    ) -> impl Future<Output = Result<Cart, ClientError>>;
}

impl ShippingBackend for StorefrontClient {
    async fn calculate_price(
        &self,
        option_id: &str,
        cart_id: &str,
    ) -> Result<CalculatedPrice, ClientError> {
        self.calculate_price_for_shipping_option(option_id, cart_id)
            .await
    }

    async fn set_shipping_method(&self, cart_id: &str, option_id: &str) -> Result<Cart, ClientError> {
        StorefrontClient::set_shipping_method(self, cart_id, option_id).await
    }
}
