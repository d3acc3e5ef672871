mod account;
mod address;
mod cart;
mod catalog;
mod checkout;
mod context;

use clap::{Parser, Subcommand};
use shuttle_api::ApiError;
use tracing_subscriber::EnvFilter;

use account::{AccountCommands, CouponCommands};
use address::AddressCommands;
use cart::CartCommands;
use catalog::CatalogCommands;
use checkout::CheckoutCommands;
use context::Context;

#[derive(Debug, Parser)]
#[command(name = "shuttle-cli")]
#[command(about = "Badminton storefront client")]
struct Cli {
    /// User id for cart and order calls (overrides SHUTTLE_USER_ID)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Place orders and hand off to payment
    Checkout {
        #[command(subcommand)]
        command: CheckoutCommands,
    },
    /// Manage saved shipping addresses
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Sign in, sign out and profile
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Coupon wallet
    Coupons {
        #[command(subcommand)]
        command: CouponCommands,
    },
    /// Past orders, newest first
    Orders,
    /// Interpret a payment SDK callback payload (JSON)
    PaymentResult {
        /// Callback JSON as delivered by the payment component
        payload: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("shuttle-cli ready; run with --help for commands");
        return Ok(());
    };

    if let Commands::PaymentResult { payload } = &command {
        return checkout::run_payment_result(payload);
    }

    let config = shuttle_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "config loaded");

    let ctx = Context::new(config, cli.user)?;
    let result = dispatch(&ctx, command).await;
    if let Err(e) = &result {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            eprintln!("{}", api.user_message());
        }
    }
    result
}

async fn dispatch(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Catalog { command } => catalog::run(ctx, command).await,
        Commands::Cart { command } => cart::run(ctx, command).await,
        Commands::Checkout { command } => checkout::run(ctx, command).await,
        Commands::Address { command } => address::run(ctx, command).await,
        Commands::Account { command } => account::run_account(ctx, command).await,
        Commands::Coupons { command } => account::run_coupons(ctx, command).await,
        Commands::Orders => account::run_orders(ctx).await,
        Commands::PaymentResult { payload } => checkout::run_payment_result(&payload),
    }
}

#[cfg(test)]
mod tests;
