use super::*;

fn line(id: &str, brand: &str) -> CartLine {
    CartLine {
        id: id.to_string(),
        product_id: format!("prod-{id}"),
        quantity: 1,
        option_label: crate::cart::NO_OPTION_LABEL.to_string(),
        options: Vec::new(),
        unit_price_original: 0,
        unit_price_sell: 0,
        brand: brand.to_string(),
        name: format!("item {id}"),
        is_active: true,
    }
}

fn lines() -> Vec<CartLine> {
    vec![line("a", "X"), line("b", "X"), line("c", "Y")]
}

fn ids(sel: &SelectionSet) -> Vec<String> {
    let mut v: Vec<String> = sel.iter().map(str::to_string).collect();
    v.sort();
    v
}

#[test]
fn select_all_from_none_selects_every_line() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_all(&lines);
    assert_eq!(ids(&sel), vec!["a", "b", "c"]);
    assert!(sel.is_all_selected(&lines));
}

#[test]
fn select_all_twice_from_none_returns_to_none() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_all(&lines);
    sel.select_all(&lines);
    assert!(sel.is_empty());
}

#[test]
fn select_all_twice_from_all_returns_to_all() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_all(&lines);
    let before = sel.clone();
    sel.select_all(&lines);
    sel.select_all(&lines);
    assert_eq!(sel, before);
}

#[test]
fn select_all_twice_from_partial_does_not_restore() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_one(&lines, "a");
    let before = sel.clone();
    sel.select_all(&lines);
    sel.select_all(&lines);
    assert_ne!(sel, before);
    assert!(sel.is_empty());
}

#[test]
fn select_all_toggles_off_with_duplicate_line_ids() {
    let lines = vec![line("a", "X"), line("a", "X"), line("b", "Y")];
    let mut sel = SelectionSet::new();
    sel.select_all(&lines);
    assert_eq!(ids(&sel), vec!["a", "b"]);
    assert!(sel.is_all_selected(&lines));
    sel.select_all(&lines);
    assert!(sel.is_empty());
}

#[test]
fn select_one_toggles_membership() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    assert!(sel.select_one(&lines, "b"));
    assert!(sel.contains("b"));
    assert!(!sel.select_one(&lines, "b"));
    assert!(!sel.contains("b"));
}

#[test]
fn select_one_ignores_unknown_id() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    assert!(!sel.select_one(&lines, "zzz"));
    assert!(sel.is_empty());
}

#[test]
fn select_brand_adds_without_touching_other_brands() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_one(&lines, "c");
    sel.select_brand(&lines, "X");
    assert_eq!(ids(&sel), vec!["a", "b", "c"]);
}

#[test]
fn select_brand_partial_fills_the_brand() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_one(&lines, "a");
    sel.select_brand(&lines, "X");
    assert_eq!(ids(&sel), vec!["a", "b"]);
    assert!(sel.is_brand_selected(&lines, "X"));
    assert!(!sel.is_brand_selected(&lines, "Y"));
}

#[test]
fn select_brand_twice_restores_brand_state() {
    let lines = lines();
    for start in [vec![], vec!["c"], vec!["a", "b"], vec!["a", "b", "c"]] {
        let mut sel = SelectionSet::new();
        for id in &start {
            sel.select_one(&lines, id);
        }
        let before = sel.clone();
        sel.select_brand(&lines, "X");
        sel.select_brand(&lines, "X");
        assert_eq!(sel, before, "start state {start:?}");
    }
}

#[test]
fn deselect_absent_id_is_noop() {
    let lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_one(&lines, "a");
    sel.deselect("c");
    sel.deselect("nope");
    assert_eq!(ids(&sel), vec!["a"]);
}

#[test]
fn retain_existing_drops_stale_ids() {
    let mut lines = lines();
    let mut sel = SelectionSet::new();
    sel.select_all(&lines);
    lines.retain(|l| l.id != "b");
    sel.retain_existing(&lines);
    assert_eq!(ids(&sel), vec!["a", "c"]);
    assert!(sel.is_all_selected(&lines));
}
