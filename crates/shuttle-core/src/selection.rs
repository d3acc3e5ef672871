//! Checkout selection over the current cart lines.
//!
//! Every operation takes the current line slice so the set never holds an id
//! that is not in the cart.

use std::collections::HashSet;

use crate::cart::CartLine;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Toggle: clears the selection when every line is already selected,
    /// otherwise selects every line.
    pub fn select_all(&mut self, lines: &[CartLine]) {
        if self.is_all_selected(lines) {
            self.ids.clear();
        } else {
            self.ids = lines.iter().map(|l| l.id.clone()).collect();
        }
    }

    /// Toggles membership of `id`. Returns whether `id` is selected afterwards.
    ///
    /// Ids that are not in `lines` are ignored.
    pub fn select_one(&mut self, lines: &[CartLine], id: &str) -> bool {
        if !lines.iter().any(|l| l.id == id) {
            tracing::debug!(cart_item_id = %id, "ignoring selection of unknown cart line");
            return false;
        }
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Toggles a whole brand: removes its lines if all are selected, else
    /// adds them. Lines of other brands are untouched.
    pub fn select_brand(&mut self, lines: &[CartLine], brand: &str) {
        let brand_ids: Vec<&str> = lines
            .iter()
            .filter(|l| l.brand == brand)
            .map(|l| l.id.as_str())
            .collect();
        let all_selected = brand_ids.iter().all(|id| self.ids.contains(*id));
        if all_selected {
            for id in brand_ids {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(brand_ids.into_iter().map(str::to_string));
        }
    }

    /// Removes `id`; a no-op when it was not selected.
    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids whose line no longer exists.
    pub fn retain_existing(&mut self, lines: &[CartLine]) {
        self.ids.retain(|id| lines.iter().any(|l| &l.id == id));
    }

    #[must_use]
    pub fn is_all_selected(&self, lines: &[CartLine]) -> bool {
        lines.iter().all(|l| self.ids.contains(&l.id))
    }

    #[must_use]
    pub fn is_brand_selected(&self, lines: &[CartLine], brand: &str) -> bool {
        lines
            .iter()
            .filter(|l| l.brand == brand)
            .all(|l| self.ids.contains(&l.id))
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
