//! Command handlers that load a cart, build the delivery section, and print it.

use checkout_client::StorefrontClient;
use checkout_core::CheckoutStep;
use checkout_delivery::DeliverySection;

use crate::render::render_view;

async fn load_section(
    client: &StorefrontClient,
    cart_id: &str,
    step: Option<CheckoutStep>,
    pathname: &str,
) -> anyhow::Result<DeliverySection> {
    let cart = client.retrieve_cart(cart_id).await?;
    let options = client.list_shipping_options(cart_id).await?;
    tracing::info!(
        cart_id,
        items = cart.items.len(),
        options = options.len(),
        "loaded cart and shipping options"
    );

    let mut section = DeliverySection::new(pathname, step, cart, Some(options.as_slice()));
    section.refresh_prices(client).await;
    Ok(section)
}

pub(crate) async fn run_show(
    client: &StorefrontClient,
    cart_id: &str,
    step: &str,
    pathname: &str,
) -> anyhow::Result<()> {
    let step = CheckoutStep::from_param(Some(step));
    let section = load_section(client, cart_id, step, pathname).await?;
    print!("{}", render_view(&section.view()));
    Ok(())
}

pub(crate) async fn run_select(
    client: &StorefrontClient,
    cart_id: &str,
    option_id: Option<&str>,
    pathname: &str,
) -> anyhow::Result<()> {
    let mut section =
        load_section(client, cart_id, Some(CheckoutStep::Delivery), pathname).await?;
    section.select(client, option_id).await;

    // Offered options can depend on the confirmed method.
    let options = client.list_shipping_options(cart_id).await?;
    let cart = section.cart().clone();
    if section.update_inputs(cart, Some(options.as_slice())) {
        section.refresh_prices(client).await;
    }

    print!("{}", render_view(&section.view()));
    Ok(())
}

pub(crate) async fn run_continue(
    client: &StorefrontClient,
    cart_id: &str,
    pathname: &str,
) -> anyhow::Result<()> {
    let mut section =
        load_section(client, cart_id, Some(CheckoutStep::Delivery), pathname).await?;
    match section.continue_to_payment() {
        Some(navigation) => {
            println!("{}", navigation.href);
            Ok(())
        }
        None => anyhow::bail!("cart {cart_id} has no confirmed shipping method yet"),
    }
}
