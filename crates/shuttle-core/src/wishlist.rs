//! Liked products, kept in the order they were liked.

use crate::catalog::Product;

#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Likes `product`, or unlikes it if already liked. Returns `true` when
    /// the product is liked afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if let Some(pos) = self.items.iter().position(|p| p.id == product.id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(product);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("racket {id}"),
            brand: "Yonex".to_string(),
            price_sell: 100,
            price_original: 100,
            discount_rate: 0,
            is_active: None,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut w = Wishlist::new();
        assert!(w.toggle(product("p1")));
        assert!(w.contains("p1"));
        assert!(!w.toggle(product("p1")));
        assert!(w.is_empty());
    }

    #[test]
    fn like_order_is_preserved_across_removals() {
        let mut w = Wishlist::new();
        for id in ["p1", "p2", "p3"] {
            w.toggle(product(id));
        }
        w.toggle(product("p2"));
        w.toggle(product("p2"));
        let ids: Vec<&str> = w.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3", "p2"]);
        assert_eq!(w.len(), 3);
    }
}
