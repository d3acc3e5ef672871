use super::*;
use crate::catalog::Product;

fn record(id: &str, product_id: &str, quantity: u32, options: [OptionPair; 3]) -> CartRecord {
    CartRecord {
        id: id.to_string(),
        product_id: product_id.to_string(),
        quantity,
        options,
        created_at: None,
        updated_at: None,
    }
}

fn no_options() -> [OptionPair; 3] {
    [
        OptionPair::default(),
        OptionPair::default(),
        OptionPair::default(),
    ]
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        Product {
            id: "p1".to_string(),
            name: "Astrox 99 Pro".to_string(),
            brand: "Yonex".to_string(),
            price_sell: 189_000,
            price_original: 239_000,
            discount_rate: 21,
            is_active: Some(true),
        },
        Product {
            id: "p2".to_string(),
            name: "Thruster Ryuga".to_string(),
            brand: "Victor".to_string(),
            price_sell: 150_000,
            price_original: 150_000,
            discount_rate: 0,
            is_active: Some(false),
        },
        Product {
            id: "p3".to_string(),
            name: "Power Cushion 65Z".to_string(),
            brand: "Yonex".to_string(),
            price_sell: 120_000,
            price_original: 140_000,
            discount_rate: 14,
            is_active: None,
        },
    ])
}

#[test]
fn label_without_any_complete_pair_is_placeholder() {
    assert_eq!(option_label(&no_options()), NO_OPTION_LABEL);
}

#[test]
fn label_ignores_half_filled_pairs() {
    let pairs = [
        OptionPair {
            kind: Some("색상".to_string()),
            value: None,
        },
        OptionPair {
            kind: None,
            value: Some("4U".to_string()),
        },
        OptionPair {
            kind: Some(String::new()),
            value: Some("G5".to_string()),
        },
    ];
    assert_eq!(option_label(&pairs), NO_OPTION_LABEL);
}

#[test]
fn label_with_single_pair_has_no_separator() {
    let pairs = [
        OptionPair::default(),
        OptionPair::new("무게", "4U"),
        OptionPair::default(),
    ];
    assert_eq!(option_label(&pairs), "무게: 4U");
}

#[test]
fn label_joins_pairs_in_slot_order() {
    let pairs = [
        OptionPair::new("무게", "4U"),
        OptionPair::new("그립", "G5"),
        OptionPair::new("스트링", "BG66"),
    ];
    assert_eq!(option_label(&pairs), "무게: 4U / 그립: G5 / 스트링: BG66");
}

#[test]
fn merge_copies_catalog_display_fields() {
    let rec = record(
        "c1",
        "p1",
        2,
        [
            OptionPair::new("무게", "4U"),
            OptionPair::default(),
            OptionPair::default(),
        ],
    );
    let line = merge_record(&rec, &catalog());
    assert_eq!(line.id, "c1");
    assert_eq!(line.product_id, "p1");
    assert_eq!(line.name, "Astrox 99 Pro");
    assert_eq!(line.brand, "Yonex");
    assert_eq!(line.unit_price_sell, 189_000);
    assert_eq!(line.unit_price_original, 239_000);
    assert_eq!(line.option_label, "무게: 4U");
    assert_eq!(line.options.len(), 1);
    assert!(line.is_active);
    assert_eq!(line.line_total(), 378_000);
}

#[test]
fn merge_with_unknown_product_degrades_to_placeholders() {
    let rec = record("c9", "p404", 1, no_options());
    let line = merge_record(&rec, &catalog());
    assert_eq!(line.name, UNKNOWN_PRODUCT_NAME);
    assert_eq!(line.brand, DEFAULT_BRAND);
    assert_eq!(line.unit_price_sell, 0);
    assert_eq!(line.unit_price_original, 0);
    assert!(line.is_active);
    assert_eq!(line.option_label, NO_OPTION_LABEL);
}

#[test]
fn merge_missing_active_flag_defaults_to_active() {
    let line = merge_record(&record("c3", "p3", 1, no_options()), &catalog());
    assert!(line.is_active);
}

#[test]
fn merge_carries_sold_out_flag() {
    let line = merge_record(&record("c2", "p2", 1, no_options()), &catalog());
    assert!(!line.is_active);
}

#[test]
fn merge_cart_preserves_record_order() {
    let records = vec![
        record("c2", "p2", 1, no_options()),
        record("c1", "p1", 1, no_options()),
    ];
    let ids: Vec<String> = merge_cart(&records, &catalog())
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec!["c2", "c1"]);
}

#[test]
fn group_by_brand_uses_first_seen_order() {
    let records = vec![
        record("c1", "p1", 1, no_options()),
        record("c2", "p2", 1, no_options()),
        record("c3", "p3", 1, no_options()),
    ];
    let lines = merge_cart(&records, &catalog());
    let groups = group_by_brand(&lines);
    let brands: Vec<&str> = groups.iter().map(|g| g.brand).collect();
    assert_eq!(brands, vec!["Yonex", "Victor"]);
    let yonex: Vec<&str> = groups[0].lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(yonex, vec!["c1", "c3"]);
}

#[test]
fn group_by_brand_is_stable_across_calls() {
    let records = vec![
        record("c3", "p3", 1, no_options()),
        record("c2", "p2", 1, no_options()),
        record("c1", "p1", 1, no_options()),
    ];
    let lines = merge_cart(&records, &catalog());
    assert_eq!(group_by_brand(&lines), group_by_brand(&lines));
}

#[test]
fn option_key_ignores_selection_order() {
    let a = vec![
        OptionSelection {
            kind: "무게".to_string(),
            value: "4U".to_string(),
        },
        OptionSelection {
            kind: "그립".to_string(),
            value: "G5".to_string(),
        },
    ];
    let mut b = a.clone();
    b.reverse();
    assert_eq!(option_key(&a), option_key(&b));
    assert_eq!(selection_label(&a), "무게: 4U / 그립: G5");
    assert_eq!(selection_label(&[]), NO_OPTION_LABEL);
}

#[test]
fn option_columns_fill_in_order_and_skip_empty() {
    let cols = OptionColumns::from_selections(&[
        OptionSelection {
            kind: "그립".to_string(),
            value: "G5".to_string(),
        },
        OptionSelection {
            kind: "무게".to_string(),
            value: "4U".to_string(),
        },
    ])
    .unwrap();
    assert_eq!(cols.option_1_type.as_deref(), Some("그립"));
    assert_eq!(cols.option_2_value.as_deref(), Some("4U"));
    assert_eq!(cols.option_3_type, None);
}

#[test]
fn option_columns_reject_a_fourth_option() {
    let options: Vec<OptionSelection> = ["a", "b", "c", "d"]
        .iter()
        .map(|k| OptionSelection {
            kind: (*k).to_string(),
            value: "1".to_string(),
        })
        .collect();
    assert_eq!(
        OptionColumns::from_selections(&options).unwrap_err(),
        CartError::TooManyOptions { given: 4, max: 3 }
    );
    assert!(check_option_count(&options[..3]).is_ok());
}
