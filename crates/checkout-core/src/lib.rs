pub mod app_config;
pub mod config;
pub mod coverage;
pub mod error;
pub mod grouping;
pub mod money;
pub mod step;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coverage::{
    compute_missing_sellers, missing_seller_names, MissingSellerNotice, SellerCoverage,
};
pub use error::ConfigError;
pub use grouping::{group_by_seller, SellerGroup, SellerGroups, SellerKey};
pub use money::format_amount;
pub use step::{step_href, CheckoutStep};
pub use types::{
    delivery_options, Cart, CartLineItem, FulfillmentSet, PriceType, Product,
    SelectedShippingMethod, Seller, ServiceZone, ShippingOption,
};
