//! Cart records and their merge with catalog data into display lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, DEFAULT_BRAND, UNKNOWN_PRODUCT_NAME};
use crate::error::CartError;

/// Label shown when a cart entry carries no complete option pair.
pub const NO_OPTION_LABEL: &str = "옵션 정보 없음";

/// Number of option slots a cart entry can carry.
pub const OPTION_SLOTS: usize = 3;

/// One `(type, value)` option slot as stored on a cart record. Either half
/// may be missing; only slots with both halves count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPair {
    pub kind: Option<String>,
    pub value: Option<String>,
}

impl OptionPair {
    #[must_use]
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            value: Some(value.to_string()),
        }
    }

    /// Returns the pair as a selection if both halves are present and non-empty.
    #[must_use]
    pub fn as_selection(&self) -> Option<OptionSelection> {
        match (self.kind.as_deref(), self.value.as_deref()) {
            (Some(kind), Some(value)) if !kind.is_empty() && !value.is_empty() => {
                Some(OptionSelection {
                    kind: kind.to_string(),
                    value: value.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// A complete option choice, e.g. `그립: G5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub kind: String,
    pub value: String,
}

/// Rejects option lists that do not fit the cart entry's slots.
///
/// # Errors
///
/// Returns [`CartError::TooManyOptions`] when more than [`OPTION_SLOTS`]
/// options are given.
pub fn check_option_count(options: &[OptionSelection]) -> Result<(), CartError> {
    if options.len() > OPTION_SLOTS {
        return Err(CartError::TooManyOptions {
            given: options.len(),
            max: OPTION_SLOTS,
        });
    }
    Ok(())
}

/// Option columns as the cart and order endpoints take them. Empty slots
/// are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionColumns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_1_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_1_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_2_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_2_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_3_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_3_value: Option<String>,
}

impl OptionColumns {
    /// Fills slots in order from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TooManyOptions`] instead of dropping options past
    /// the last slot.
    pub fn from_selections(options: &[OptionSelection]) -> Result<Self, CartError> {
        check_option_count(options)?;
        let mut cols = Self::default();
        let slots = [
            (&mut cols.option_1_type, &mut cols.option_1_value),
            (&mut cols.option_2_type, &mut cols.option_2_value),
            (&mut cols.option_3_type, &mut cols.option_3_value),
        ];
        for ((kind, value), option) in slots.into_iter().zip(options) {
            *kind = Some(option.kind.clone());
            *value = Some(option.value.clone());
        }
        Ok(cols)
    }
}

/// A cart entry as the backend stores it, already validated at the network
/// boundary (`quantity >= 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub options: [OptionPair; OPTION_SLOTS],
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A cart entry merged with catalog display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub option_label: String,
    pub options: Vec<OptionSelection>,
    pub unit_price_original: u64,
    pub unit_price_sell: u64,
    pub brand: String,
    pub name: String,
    pub is_active: bool,
}

impl CartLine {
    /// `unit_price_sell * quantity`, saturating.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price_sell.saturating_mul(u64::from(self.quantity))
    }

    /// Order-insensitive identity of the option combination, used to spot
    /// two lines of the same product with identical options.
    #[must_use]
    pub fn option_key(&self) -> String {
        option_key(&self.options)
    }
}

/// Builds the display label for up to three option slots.
///
/// Complete pairs render as `"{type}: {value}"` in slot order, joined with
/// `" / "`. With no complete pair the label is [`NO_OPTION_LABEL`].
#[must_use]
pub fn option_label(pairs: &[OptionPair]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(OptionPair::as_selection)
        .map(|s| format!("{}: {}", s.kind, s.value))
        .collect();
    if parts.is_empty() {
        NO_OPTION_LABEL.to_string()
    } else {
        parts.join(" / ")
    }
}

/// Label for already-complete selections (used after a local option edit).
#[must_use]
pub fn selection_label(selections: &[OptionSelection]) -> String {
    if selections.is_empty() {
        return NO_OPTION_LABEL.to_string();
    }
    selections
        .iter()
        .map(|s| format!("{}: {}", s.kind, s.value))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Sorted `type:value` pairs joined with `|`.
#[must_use]
pub fn option_key(selections: &[OptionSelection]) -> String {
    let mut parts: Vec<String> = selections
        .iter()
        .map(|s| format!("{}:{}", s.kind, s.value))
        .collect();
    parts.sort();
    parts.join("|")
}

/// Merges one cart record with its catalog entry.
///
/// A missing catalog entry degrades silently to placeholder name and brand
/// with zero prices.
#[must_use]
pub fn merge_record(record: &CartRecord, catalog: &Catalog) -> CartLine {
    let product = catalog.lookup(&record.product_id);
    if product.is_none() {
        tracing::debug!(
            cart_item_id = %record.id,
            product_id = %record.product_id,
            "cart line references a product missing from the catalog snapshot"
        );
    }

    CartLine {
        id: record.id.clone(),
        product_id: record.product_id.clone(),
        quantity: record.quantity,
        option_label: option_label(&record.options),
        options: record
            .options
            .iter()
            .filter_map(OptionPair::as_selection)
            .collect(),
        unit_price_original: product.map_or(0, |p| p.price_original),
        unit_price_sell: product.map_or(0, |p| p.price_sell),
        brand: product.map_or_else(|| DEFAULT_BRAND.to_string(), |p| p.brand.clone()),
        name: product.map_or_else(|| UNKNOWN_PRODUCT_NAME.to_string(), |p| p.name.clone()),
        is_active: product.map_or(true, |p| p.is_available()),
    }
}

/// Merges every record, preserving record order.
#[must_use]
pub fn merge_cart(records: &[CartRecord], catalog: &Catalog) -> Vec<CartLine> {
    records.iter().map(|r| merge_record(r, catalog)).collect()
}

/// Lines sharing one brand, for section rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandGroup<'a> {
    pub brand: &'a str,
    pub lines: Vec<&'a CartLine>,
}

/// Partitions lines by brand in first-seen order.
///
/// The order depends only on the input sequence, so repeated renders of the
/// same data produce identical sections.
#[must_use]
pub fn group_by_brand(lines: &[CartLine]) -> Vec<BrandGroup<'_>> {
    let mut groups: Vec<BrandGroup<'_>> = Vec::new();
    for line in lines {
        match groups.iter_mut().find(|g| g.brand == line.brand) {
            Some(group) => group.lines.push(line),
            None => groups.push(BrandGroup {
                brand: &line.brand,
                lines: vec![line],
            }),
        }
    }
    groups
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
