//! Delivery step of the checkout: price resolution, shipping-method
//! selection, and the view model the storefront renders.

pub mod backend;
pub mod prices;
pub mod section;
pub mod selection;
pub mod view;

pub use backend::ShippingBackend;
pub use prices::{resolve_calculated_prices, BatchTicket, CalculatedPriceMap, PriceBatches};
pub use section::{DeliverySection, Navigation, NavigationMode, PriceRefresh};
pub use selection::{SelectionState, ShippingSelection};
pub use view::{
    DeliveryMode, DeliveryView, MethodSummary, OptionView, PriceDisplay, SellerGroupView,
};
