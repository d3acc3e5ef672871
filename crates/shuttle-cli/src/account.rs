//! Sign-in, profile, coupon wallet and order history commands.

use chrono::Utc;
use clap::Subcommand;
use shuttle_core::coupon::{self, Discount};
use shuttle_core::LoginProvider;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// Sign in with a social provider token
    Login {
        /// kakao, apple or google
        #[arg(long)]
        provider: LoginProvider,
        /// Access token issued by the provider's SDK
        #[arg(long, env = "SHUTTLE_PROVIDER_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Sign in with email and password
    PasswordLogin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHUTTLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in profile
    Profile,
    /// Change the display name
    Rename { name: String },
}

#[derive(Debug, Subcommand)]
pub enum CouponCommands {
    /// List wallet coupons
    List {
        /// Only coupons usable now
        #[arg(long)]
        available: bool,
    },
    /// Register a coupon by code
    Register { code: String },
}

pub(crate) async fn run_account(ctx: &Context, command: AccountCommands) -> anyhow::Result<()> {
    match command {
        AccountCommands::Login { provider, token } => {
            let session = ctx.call(ctx.client.social_login(provider, &token)).await?;
            println!(
                "signed in as {} ({})",
                session.name.as_deref().unwrap_or("-"),
                session.id
            );
        }
        AccountCommands::PasswordLogin { email, password } => {
            let session = ctx
                .call(ctx.client.password_login(&email, &password))
                .await?;
            println!(
                "signed in as {} ({})",
                session.name.as_deref().unwrap_or("-"),
                session.id
            );
        }
        AccountCommands::Logout => {
            ctx.client.logout()?;
            println!("signed out");
        }
        AccountCommands::Profile => {
            let session = ctx.call(ctx.client.fetch_profile()).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        AccountCommands::Rename { name } => {
            ctx.call(ctx.client.rename(&name)).await?;
            println!("name changed to {name}");
        }
    }
    Ok(())
}

pub(crate) async fn run_coupons(ctx: &Context, command: CouponCommands) -> anyhow::Result<()> {
    let user_id = ctx.user_id().await?;
    match command {
        CouponCommands::List { available } => {
            let wallet = ctx.call(ctx.client.coupon_wallet(&user_id)).await?;
            let now = Utc::now();
            let shown: Vec<_> = if available {
                coupon::available_coupons(&wallet, now)
            } else {
                wallet.iter().collect()
            };
            println!("{} unused coupon(s)", coupon::unused_count(&wallet));
            for entry in shown {
                let Some(c) = &entry.coupon else {
                    println!("{:<38}(details unavailable)", entry.id);
                    continue;
                };
                let limit = match c.discount() {
                    Discount::Rate { max, .. } if max > 0 => format!(" up to {max}원"),
                    _ => String::new(),
                };
                let state = if entry.is_used {
                    "used"
                } else if entry.is_available(now) {
                    "usable"
                } else {
                    "expired"
                };
                println!(
                    "{:<38}{:>8}{limit}  min {}원  until {}  [{state}]  {}",
                    entry.id,
                    c.headline(),
                    c.min_order_amount,
                    c.valid_until.format("%Y-%m-%d"),
                    c.description.as_deref().unwrap_or("")
                );
            }
        }
        CouponCommands::Register { code } => {
            ctx.call(ctx.client.register_coupon(&user_id, &code)).await?;
            println!("coupon {code} registered");
        }
    }
    Ok(())
}

pub(crate) async fn run_orders(ctx: &Context) -> anyhow::Result<()> {
    let user_id = ctx.user_id().await?;
    let orders = ctx.call(ctx.client.order_history(&user_id)).await?;
    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }
    for order in &orders {
        let placed = order
            .placed_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!("{}  {placed}", order.summary.id);
        for item in &order.items {
            println!(
                "    {} x{}  {}원",
                item.product_name, item.quantity, item.final_price
            );
        }
    }
    Ok(())
}
