mod delivery;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "checkout-cli")]
#[command(about = "Drive the storefront checkout delivery step from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the delivery step for a cart
    Show {
        #[arg(long)]
        cart_id: String,
        /// Value of the `step` query parameter (e.g. `delivery`, `payment`)
        #[arg(long, default_value = "delivery")]
        step: String,
        #[arg(long, default_value = "/checkout")]
        pathname: String,
    },
    /// Commit a shipping option to a cart
    Select {
        #[arg(long)]
        cart_id: String,
        /// Shipping option id; omit to submit an empty selection
        #[arg(long)]
        option_id: Option<String>,
        #[arg(long, default_value = "/checkout")]
        pathname: String,
    },
    /// Advance to the payment step once a shipping method is confirmed
    Continue {
        #[arg(long)]
        cart_id: String,
        #[arg(long, default_value = "/checkout")]
        pathname: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("checkout-cli: pass --help for available commands");
        return Ok(());
    };

    let config = checkout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "loaded configuration");

    let client = checkout_client::StorefrontClient::from_config(&config)?;

    match command {
        Commands::Show {
            cart_id,
            step,
            pathname,
        } => delivery::run_show(&client, &cart_id, &step, &pathname).await,
        Commands::Select {
            cart_id,
            option_id,
            pathname,
        } => delivery::run_select(&client, &cart_id, option_id.as_deref(), &pathname).await,
        Commands::Continue { cart_id, pathname } => {
            delivery::run_continue(&client, &cart_id, &pathname).await
        }
    }
}
