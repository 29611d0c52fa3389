//! HTTP client for the storefront backend's store API.
//!
//! Wraps `reqwest` with publishable-key handling, typed response envelopes,
//! and mapping of non-2xx responses to [`ClientError::Api`] carrying the
//! backend's own message. Requests are never retried.

use std::time::Duration;

use checkout_core::{AppConfig, Cart, ShippingOption};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{
    AddShippingMethodRequest, ApiErrorBody, CalculateRequest, CalculatedOptionResponse,
    CalculatedPrice, CartResponse, ShippingOptionsResponse,
};

/// Header carrying the storefront's publishable API key.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Client for the storefront backend.
///
/// Use [`StorefrontClient::from_config`] in binaries or
/// [`StorefrontClient::new`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
    publishable_key: Option<String>,
}

impl StorefrontClient {
    /// Creates a client from loaded application config.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            config.publishable_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        publishable_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so endpoint segments append to the path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            publishable_key: publishable_key.map(str::to_owned),
        })
    }

    /// Fetches a cart with its line items and committed shipping methods.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match the expected shape.
    pub async fn retrieve_cart(&self, cart_id: &str) -> Result<Cart, ClientError> {
        let url = self.endpoint(&["store", "carts", cart_id])?;
        let envelope: CartResponse = self
            .send_json(self.client.get(url), &format!("retrieve_cart(id={cart_id})"))
            .await?;
        Ok(envelope.cart)
    }

    /// Lists every shipping option offered for a cart, pickup included.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::retrieve_cart`].
    pub async fn list_shipping_options(
        &self,
        cart_id: &str,
    ) -> Result<Vec<ShippingOption>, ClientError> {
        let mut url = self.endpoint(&["store", "shipping-options"])?;
        url.query_pairs_mut().append_pair("cart_id", cart_id);
        let envelope: ShippingOptionsResponse = self
            .send_json(
                self.client.get(url),
                &format!("list_shipping_options(cart_id={cart_id})"),
            )
            .await?;
        Ok(envelope.shipping_options)
    }

    /// Asks the backend to price a `calculated` shipping option for a cart.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::retrieve_cart`].
    pub async fn calculate_price_for_shipping_option(
        &self,
        option_id: &str,
        cart_id: &str,
    ) -> Result<CalculatedPrice, ClientError> {
        let url = self.endpoint(&["store", "shipping-options", option_id, "calculate"])?;
        let request = self.client.post(url).json(&CalculateRequest { cart_id });
        let envelope: CalculatedOptionResponse = self
            .send_json(
                request,
                &format!("calculate(option_id={option_id}, cart_id={cart_id})"),
            )
            .await?;
        Ok(envelope.shipping_option)
    }

    /// Commits a shipping option to the cart and returns the updated cart.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::retrieve_cart`]. A rejected option surfaces
    /// as [`ClientError::Api`] whose `Display` is the backend's message.
    pub async fn set_shipping_method(
        &self,
        cart_id: &str,
        shipping_method_id: &str,
    ) -> Result<Cart, ClientError> {
        let url = self.endpoint(&["store", "carts", cart_id, "shipping-methods"])?;
        let request = self.client.post(url).json(&AddShippingMethodRequest {
            option_id: shipping_method_id,
        });
        let envelope: CartResponse = self
            .send_json(
                request,
                &format!("set_shipping_method(cart_id={cart_id}, option_id={shipping_method_id})"),
            )
            .await?;
        Ok(envelope.cart)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and decodes a 2xx JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`]
    /// on network failure, and [`ClientError::Deserialize`] if the body does
    /// not decode.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let request = match &self.publishable_key {
            Some(key) => request.header(PUBLISHABLE_KEY_HEADER, key),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = Self::error_message(&body)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
            tracing::debug!(context, status = status.as_u16(), %message, "store API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Extracts the `"message"` field from an error body, if present and non-empty.
    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
