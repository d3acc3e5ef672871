//! Checkout commands: build the order, submit it, print the payment request.

use chrono::Utc;
use clap::{Args, Subcommand};
use shuttle_api::PlacedOrder;
use shuttle_core::address::{self, AddressForm};
use shuttle_core::cart::OptionSelection;
use shuttle_core::checkout::{self, BuyNow, DraftBuilder};
use shuttle_core::payment::{PaymentCallback, PaymentOutcome, PaymentProvider};

use crate::address::AddressArgs;
use crate::cart::{parse_option, SelectArgs};
use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum CheckoutCommands {
    /// Order the selected cart lines
    Cart {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Order a single product directly
    BuyNow {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Option as TYPE=VALUE (repeatable)
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<OptionSelection>,
        #[command(flatten)]
        order: OrderArgs,
    },
}

/// Shipping, discount and payment choices common to both checkouts.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Saved address to ship to; defaults to the default saved address
    #[arg(long)]
    pub address_id: Option<String>,
    #[command(flatten)]
    pub address: AddressArgs,
    /// Points to redeem
    #[arg(long, default_value = "0")]
    pub points: u64,
    /// Split the point discount across items
    #[arg(long)]
    pub apportion_points: bool,
    /// tosspay, kakaopay or other
    #[arg(long, default_value = "tosspay")]
    pub provider: String,
    /// card or mobile, when provider is `other`
    #[arg(long)]
    pub method: Option<String>,
}

pub(crate) async fn run(ctx: &Context, command: CheckoutCommands) -> anyhow::Result<()> {
    match command {
        CheckoutCommands::Cart { select, order } => {
            let provider = parse_provider(&order)?;
            let user_id = ctx.user_id().await?;
            let form = resolve_address(ctx, &order).await?;
            let builder = draft_builder(form, &order);

            let mut view = ctx.call(ctx.client.load_cart_view(&user_id)).await?;
            select.apply(&mut view);
            let placed = ctx
                .call(ctx.client.place_cart_order(&view, &builder))
                .await?;
            print_payment_request(ctx, &placed, provider)
        }
        CheckoutCommands::BuyNow {
            product_id,
            quantity,
            options,
            order,
        } => {
            let provider = parse_provider(&order)?;
            let form = resolve_address(ctx, &order).await?;
            let builder = draft_builder(form, &order);

            let catalog = ctx.call(ctx.client.fetch_catalog()).await?;
            let product = catalog
                .lookup(&product_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("product '{product_id}' not found"))?;
            let item = BuyNow {
                product,
                quantity,
                options,
            };
            let placed = ctx
                .call(ctx.client.place_buy_now_order(&item, &builder))
                .await?;
            print_payment_request(ctx, &placed, provider)
        }
    }
}

fn parse_provider(order: &OrderArgs) -> anyhow::Result<PaymentProvider> {
    PaymentProvider::parse(&order.provider, order.method.as_deref()).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown payment provider '{}'{}",
            order.provider,
            order
                .method
                .as_deref()
                .map(|m| format!(" / method '{m}'"))
                .unwrap_or_default()
        )
    })
}

fn draft_builder(form: AddressForm, order: &OrderArgs) -> DraftBuilder {
    DraftBuilder::new(form)
        .points(order.points)
        .apportion_points(order.apportion_points)
}

/// Inline address flags win; otherwise a saved address by id, otherwise the
/// preferred saved address.
async fn resolve_address(ctx: &Context, order: &OrderArgs) -> anyhow::Result<AddressForm> {
    if order.address.is_given() {
        return Ok(order.address.to_form());
    }
    let saved = ctx.call(ctx.client.list_addresses()).await?;
    let chosen = match order.address_id.as_deref() {
        Some(id) => saved
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| anyhow::anyhow!("saved address '{id}' not found"))?,
        None => address::preferred_address(&saved).ok_or_else(|| {
            anyhow::anyhow!("no saved address; pass --recipient/--phone/--zipcode/--line1")
        })?,
    };
    let mut form = chosen.form.clone();
    if let Some(memo) = &order.address.memo {
        form.order_memo.clone_from(memo);
    }
    Ok(form)
}

fn print_payment_request(
    ctx: &Context,
    placed: &PlacedOrder,
    provider: PaymentProvider,
) -> anyhow::Result<()> {
    let request = checkout::payment_request(
        &placed.draft,
        &placed.order_id,
        provider,
        &ctx.config,
        Utc::now(),
    );
    tracing::info!(
        order_id = %placed.order_id,
        payment_id = %request.payment_id,
        total = request.total_amount,
        "payment request ready"
    );
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

pub(crate) fn run_payment_result(payload: &str) -> anyhow::Result<()> {
    let callback: PaymentCallback = serde_json::from_str(payload)?;
    match PaymentOutcome::from(callback) {
        PaymentOutcome::Paid { payment_id, tx_id } => {
            println!(
                "paid: {payment_id}{}",
                tx_id.map(|t| format!(" (tx {t})")).unwrap_or_default()
            );
            Ok(())
        }
        PaymentOutcome::Failed {
            payment_id,
            code,
            message,
        } => anyhow::bail!("payment {payment_id} failed [{code}]: {message}"),
    }
}
