//! Catalog browsing commands.

use clap::Subcommand;
use shuttle_core::catalog::{self, Product};

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Home listing; falls back to a built-in list when the backend is down
    Home,
    /// List catalog products
    List {
        /// Only products of this brand
        #[arg(long)]
        brand: Option<String>,
        /// Case-insensitive name search
        #[arg(long)]
        query: Option<String>,
        /// Print thumbnail URLs
        #[arg(long)]
        thumbnails: bool,
    },
}

pub(crate) async fn run(ctx: &Context, command: CatalogCommands) -> anyhow::Result<()> {
    match command {
        CatalogCommands::Home => {
            let products = ctx.client.home_listing().await;
            print_products(&products.iter().collect::<Vec<_>>(), None);
        }
        CatalogCommands::List {
            brand,
            query,
            thumbnails,
        } => {
            let catalog = ctx.call(ctx.client.fetch_catalog()).await?;
            let mut products: Vec<&Product> = match query.as_deref() {
                Some(q) => catalog.search(q),
                None => catalog.products().iter().collect(),
            };
            if let Some(brand) = brand.as_deref() {
                products.retain(|p| p.brand == brand);
            }
            if products.is_empty() {
                println!("no products found");
                return Ok(());
            }
            let image_base = thumbnails.then_some(ctx.config.image_base_url.as_str());
            print_products(&products, image_base);
        }
    }
    Ok(())
}

fn print_products(products: &[&Product], image_base: Option<&str>) {
    println!(
        "{:<38}{:<14}{:>10}{:>10}{:>6}  NAME",
        "ID", "BRAND", "PRICE", "LIST", "OFF"
    );
    for p in products {
        let name = if p.is_available() {
            p.name.clone()
        } else {
            format!("{} (품절)", p.name)
        };
        println!(
            "{:<38}{:<14}{:>10}{:>10}{:>5}%  {}",
            p.id, p.brand, p.price_sell, p.price_original, p.discount_rate, name
        );
        if let Some(base) = image_base {
            println!("    {}", catalog::thumbnail_url(base, &p.name));
        }
    }
}
