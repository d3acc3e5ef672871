//! Cart commands. Each run loads the cart fresh, so selection is given on
//! the command line.

use clap::{Args, Subcommand};
use shuttle_api::CartCountStore;
use shuttle_core::cart::OptionSelection;
use shuttle_core::{CartView, LineEdit, LineUpdatePlan};

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart lines grouped by brand, with totals for the selection
    Show {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Number of cart entries (badge count)
    Count,
    /// Add a product
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Option as TYPE=VALUE, e.g. 그립=G5 (repeatable, up to three)
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<OptionSelection>,
    },
    /// Delete lines
    Remove {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Change a line's quantity or options; merges into an identical line
    Edit {
        line_id: String,
        #[arg(long)]
        quantity: Option<u32>,
        /// Replacement options as TYPE=VALUE (repeatable)
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<OptionSelection>,
    },
}

/// Which cart lines to act on.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectArgs {
    /// Select every line
    #[arg(long)]
    pub all: bool,
    /// Select lines by id (comma separated or repeated)
    #[arg(long = "line", value_delimiter = ',')]
    pub lines: Vec<String>,
    /// Select every line of a brand (repeatable)
    #[arg(long)]
    pub brand: Vec<String>,
}

impl SelectArgs {
    /// Applies the selection to `view`, warning about unknown line ids.
    pub(crate) fn apply(&self, view: &mut CartView) {
        if self.all {
            view.select_all();
        }
        for brand in &self.brand {
            view.select_brand(brand);
        }
        for id in &self.lines {
            if !view.select_one(id) {
                tracing::warn!(line_id = %id, "not in cart; ignored");
            }
        }
    }
}

pub(crate) fn parse_option(raw: &str) -> Result<OptionSelection, String> {
    let (kind, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=VALUE, got '{raw}'"))?;
    let (kind, value) = (kind.trim(), value.trim());
    if kind.is_empty() || value.is_empty() {
        return Err(format!("option type and value must be non-empty in '{raw}'"));
    }
    Ok(OptionSelection {
        kind: kind.to_string(),
        value: value.to_string(),
    })
}

pub(crate) async fn run(ctx: &Context, command: CartCommands) -> anyhow::Result<()> {
    let user_id = ctx.user_id().await?;
    match command {
        CartCommands::Show { select } => {
            let mut view = ctx.call(ctx.client.load_cart_view(&user_id)).await?;
            select.apply(&mut view);
            print_view(&view);
        }
        CartCommands::Count => {
            let store = CartCountStore::new();
            store.refresh(&ctx.client, &user_id).await;
            let state = store.snapshot();
            if let Some(error) = state.error {
                anyhow::bail!("cart count unavailable: {error}");
            }
            println!("{}", state.count);
        }
        CartCommands::Add {
            product_id,
            quantity,
            options,
        } => {
            ctx.call(ctx.client.add_to_cart(&user_id, &product_id, quantity, &options))
                .await?;
            println!("added {quantity} x {product_id}");
        }
        CartCommands::Remove { select } => {
            let mut view = ctx.call(ctx.client.load_cart_view(&user_id)).await?;
            select.apply(&mut view);
            let removed = ctx.call(ctx.client.delete_selected(&mut view)).await?;
            println!("removed {removed} line(s); {} left", view.lines().len());
        }
        CartCommands::Edit {
            line_id,
            quantity,
            options,
        } => {
            let mut view = ctx.call(ctx.client.load_cart_view(&user_id)).await?;
            let current = view
                .line(&line_id)
                .ok_or_else(|| anyhow::anyhow!("line '{line_id}' is not in the cart"))?;
            let edit = LineEdit {
                quantity: quantity.unwrap_or(current.quantity),
                options: (!options.is_empty()).then_some(options),
            };
            view.edit_line(&line_id, edit)?;
            let plan = ctx
                .call(ctx.client.persist_line_update(&user_id, &mut view, &line_id))
                .await?;
            match plan {
                LineUpdatePlan::Replace { line_id, quantity } => {
                    println!("updated {line_id} (quantity {quantity})");
                }
                LineUpdatePlan::Merge {
                    into_line_id,
                    quantity,
                    remove_line_id,
                } => println!(
                    "merged {remove_line_id} into {into_line_id} (quantity {quantity})"
                ),
            }
        }
    }
    Ok(())
}

fn print_view(view: &CartView) {
    if view.is_empty() {
        println!("cart is empty");
        return;
    }
    for group in view.groups() {
        let mark = if view.is_brand_selected(group.brand) { "[x]" } else { "[ ]" };
        println!("{mark} {}", group.brand);
        for line in group.lines {
            let mark = if view.selection().contains(&line.id) { "[x]" } else { "[ ]" };
            let sold_out = if line.is_active { "" } else { " (품절)" };
            println!(
                "    {mark} {:<38}{}{sold_out}  {}  x{}  {}원",
                line.id,
                line.name,
                line.option_label,
                line.quantity,
                line.line_total()
            );
        }
    }
    let selected = view.selected_total();
    let original = view.selected_original_total();
    println!();
    println!(
        "selected {} of {} line(s){}",
        view.selection().len(),
        view.lines().len(),
        if view.is_all_selected() { " (all)" } else { "" }
    );
    println!("total: {selected}원 (list {original}원, saved {}원)", original.saturating_sub(selected));
}
