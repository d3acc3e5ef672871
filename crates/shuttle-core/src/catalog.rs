//! Product catalog snapshot and lookup.
//!
//! A [`Catalog`] is fetched once per screen visit and never mutated by the
//! client. Lookups that miss are not errors; callers fall back to
//! placeholder display values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display name used when a product id has no catalog entry.
pub const UNKNOWN_PRODUCT_NAME: &str = "알 수 없음";

/// Brand used when a product id has no catalog entry.
pub const DEFAULT_BRAND: &str = "기본브랜드";

/// A storefront product as the client displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Brand, sourced from the backend's `category_sub` column.
    pub brand: String,
    /// Current sell price in whole KRW.
    pub price_sell: u64,
    /// List price in whole KRW, shown struck through.
    pub price_original: u64,
    /// Percentage discount, 0–100.
    pub discount_rate: u8,
    /// `Some(false)` means sold out. The backend omits the flag on older
    /// rows; absence is treated as active.
    pub is_active: Option<bool>,
}

impl Product {
    /// Returns `true` unless the backend explicitly marked the product sold out.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Immutable snapshot of the product catalog, indexed by product id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a snapshot from products in fetch order.
    ///
    /// If the backend returns the same id twice, the first occurrence wins,
    /// matching a linear first-match scan.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(pos);
        }
        Self { products, index }
    }

    /// Returns the product for `product_id`, or `None` when the snapshot
    /// does not contain it.
    #[must_use]
    pub fn lookup(&self, product_id: &str) -> Option<&Product> {
        self.index
            .get(product_id)
            .and_then(|&pos| self.products.get(pos))
    }

    /// Products in the order the backend returned them.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose brand equals `brand`, in fetch order.
    pub fn by_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.brand == brand)
    }

    /// Case-insensitive substring search over product name and brand.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.brand.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Thumbnail URL for a product, keyed by product name on the image host.
#[must_use]
pub fn thumbnail_url(image_base_url: &str, product_name: &str) -> String {
    format!(
        "{}/products/{product_name}/thumbnail.jpg",
        image_base_url.trim_end_matches('/')
    )
}

/// Placeholder listing shown on the home screen when the catalog fetch fails.
///
/// Only the home/product listing degrades this way; cart and checkout report
/// the failure instead.
#[must_use]
pub fn fallback_listing() -> Vec<Product> {
    let item = |id: &str, name: &str, brand: &str, sell: u64, original: u64, rate: u8| Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        price_sell: sell,
        price_original: original,
        discount_rate: rate,
        is_active: Some(true),
    };
    vec![
        item("dummy1", "테스트 스니커즈", "DummyBrand", 39_000, 49_000, 20),
        item("dummy2", "테스트 러닝화", "TestBrand", 69_000, 99_000, 30),
        item("dummy3", "데일리 샌들", "SampleCo", 29_000, 29_000, 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, brand: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            price_sell: 1_000,
            price_original: 1_200,
            discount_rate: 16,
            is_active: None,
        }
    }

    #[test]
    fn lookup_finds_product_by_id() {
        let catalog = Catalog::new(vec![product("p1", "Astrox 99", "Yonex")]);
        let found = catalog.lookup("p1").expect("p1 should be present");
        assert_eq!(found.name, "Astrox 99");
    }

    #[test]
    fn lookup_miss_returns_none() {
        let catalog = Catalog::new(vec![product("p1", "Astrox 99", "Yonex")]);
        assert!(catalog.lookup("p404").is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first_occurrence() {
        let catalog = Catalog::new(vec![
            product("p1", "First", "Yonex"),
            product("p1", "Second", "Yonex"),
        ]);
        assert_eq!(catalog.lookup("p1").unwrap().name, "First");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn missing_active_flag_counts_as_available() {
        let p = product("p1", "Astrox 99", "Yonex");
        assert!(p.is_available());
        let sold_out = Product {
            is_active: Some(false),
            ..p
        };
        assert!(!sold_out.is_available());
    }

    #[test]
    fn search_matches_name_and_brand_case_insensitively() {
        let catalog = Catalog::new(vec![
            product("p1", "Astrox 99", "Yonex"),
            product("p2", "Thruster K", "Victor"),
        ]);
        let hits: Vec<&str> = catalog.search("yon").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["p1"]);
        let hits: Vec<&str> = catalog.search("THRUSTER").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["p2"]);
        assert!(catalog.search("  ").is_empty());
    }

    #[test]
    fn by_brand_preserves_fetch_order() {
        let catalog = Catalog::new(vec![
            product("p1", "A", "Yonex"),
            product("p2", "B", "Victor"),
            product("p3", "C", "Yonex"),
        ]);
        let ids: Vec<&str> = catalog.by_brand("Yonex").map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn thumbnail_url_strips_trailing_slash() {
        assert_eq!(
            thumbnail_url("https://img.test/", "Astrox 99"),
            "https://img.test/products/Astrox 99/thumbnail.jpg"
        );
    }

    #[test]
    fn fallback_listing_is_non_empty_and_active() {
        let listing = fallback_listing();
        assert_eq!(listing.len(), 3);
        assert!(listing.iter().all(Product::is_available));
    }
}
