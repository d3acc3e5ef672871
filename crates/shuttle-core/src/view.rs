//! The cart screen's state: merged lines plus the checkout selection.
//!
//! All mutations are synchronous and replace state in one step; the
//! selection is reconciled on every change to the line set.

use crate::cart::{self, BrandGroup, CartLine, CartRecord, OptionSelection};
use crate::catalog::Catalog;
use crate::error::CartError;
use crate::selection::SelectionSet;
use crate::totals;

#[derive(Debug, Clone, Default)]
pub struct CartView {
    lines: Vec<CartLine>,
    selection: SelectionSet,
}

/// A local change to one line from the option-edit sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub quantity: u32,
    /// Replacement options; `None` keeps the current ones.
    pub options: Option<Vec<OptionSelection>>,
}

/// How an edited line is pushed to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineUpdatePlan {
    /// No other line shares the product and option set: update in place.
    Replace { line_id: String, quantity: u32 },
    /// Another line already has the same product and options: fold the
    /// edited quantity into it and delete the edited line.
    Merge {
        into_line_id: String,
        quantity: u32,
        remove_line_id: String,
    },
}

impl CartView {
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self {
            lines,
            selection: SelectionSet::new(),
        }
    }

    #[must_use]
    pub fn from_records(records: &[CartRecord], catalog: &Catalog) -> Self {
        Self::new(cart::merge_cart(records, catalog))
    }

    /// Swaps in a freshly fetched line set, keeping the selection for lines
    /// that still exist.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
        self.selection.retain_existing(&self.lines);
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn groups(&self) -> Vec<BrandGroup<'_>> {
        cart::group_by_brand(&self.lines)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.lines);
    }

    pub fn select_one(&mut self, id: &str) -> bool {
        self.selection.select_one(&self.lines, id)
    }

    pub fn select_brand(&mut self, brand: &str) {
        self.selection.select_brand(&self.lines, brand);
    }

    pub fn deselect(&mut self, id: &str) {
        self.selection.deselect(id);
    }

    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.lines)
    }

    #[must_use]
    pub fn is_brand_selected(&self, brand: &str) -> bool {
        self.selection.is_brand_selected(&self.lines, brand)
    }

    /// Removes a line and its selection entry. Returns the removed line.
    pub fn remove_line(&mut self, id: &str) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.id == id)?;
        self.selection.deselect(id);
        Some(self.lines.remove(pos))
    }

    /// Removes every line named in `ids`, returning how many were removed.
    pub fn remove_lines(&mut self, ids: &[String]) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| !ids.contains(&l.id));
        for id in ids {
            self.selection.deselect(id);
        }
        before - self.lines.len()
    }

    /// Ids of selected lines in cart order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_lines().into_iter().map(|l| l.id.clone()).collect()
    }

    /// Selected lines in cart order.
    #[must_use]
    pub fn selected_lines(&self) -> Vec<&CartLine> {
        self.lines
            .iter()
            .filter(|l| self.selection.contains(&l.id))
            .collect()
    }

    #[must_use]
    pub fn selected_total(&self) -> u64 {
        totals::selected_total(&self.lines, &self.selection)
    }

    #[must_use]
    pub fn selected_original_total(&self) -> u64 {
        totals::selected_original_total(&self.lines, &self.selection)
    }

    /// Applies a local quantity/option edit. Quantities below 1 clamp to 1.
    ///
    /// # Errors
    ///
    /// - [`CartError::TooManyOptions`] if the replacement options do not fit
    ///   the entry's slots; the line is left unchanged.
    /// - [`CartError::UnknownLine`] if `id` is not in the cart.
    pub fn edit_line(&mut self, id: &str, edit: LineEdit) -> Result<(), CartError> {
        if let Some(options) = &edit.options {
            cart::check_option_count(options)?;
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CartError::UnknownLine(id.to_string()))?;
        line.quantity = edit.quantity.max(1);
        if let Some(options) = edit.options {
            line.option_label = cart::selection_label(&options);
            line.options = options;
        }
        Ok(())
    }

    /// Decides how the (locally edited) line `id` should be persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLine`] if `id` is not in the cart.
    pub fn plan_line_update(&self, id: &str) -> Result<LineUpdatePlan, CartError> {
        let edited = self
            .line(id)
            .ok_or_else(|| CartError::UnknownLine(id.to_string()))?;
        let key = edited.option_key();
        let duplicate = self
            .lines
            .iter()
            .find(|l| l.id != edited.id && l.product_id == edited.product_id && l.option_key() == key);

        Ok(match duplicate {
            Some(other) => LineUpdatePlan::Merge {
                into_line_id: other.id.clone(),
                quantity: other.quantity.saturating_add(edited.quantity),
                remove_line_id: edited.id.clone(),
            },
            None => LineUpdatePlan::Replace {
                line_id: edited.id.clone(),
                quantity: edited.quantity,
            },
        })
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
