//! Property tests for faceting and filtering.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shelf_catalog::prelude::*;

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        0i64..1_000,
        "[A-Za-z ]{0,12}",
        proptest::option::of(0i64..5),
        proptest::option::of(prop_oneof![Just("Acme"), Just("Razer"), Just(" logitech ")]),
        proptest::option::of(0i64..4),
        proptest::option::of(prop_oneof![Just("Mice"), Just("Keyboards"), Just("")]),
        proptest::option::of(0.0f64..500.0),
        proptest::option::of(0.0f64..500.0),
        0i64..3,
    )
        .prop_map(
            |(id, name, brand_id, brand_name, category_id, category_name, regular, sale, stock)| {
                Product {
                    id,
                    name,
                    brand_id,
                    brand_name: brand_name.map(str::to_string),
                    category_id,
                    category_name: category_name.map(str::to_string),
                    regular_price: regular,
                    sale_price: sale,
                    in_stock: stock,
                    ..Default::default()
                }
            },
        )
}

fn state_strategy() -> impl Strategy<Value = FilterState> {
    (
        proptest::collection::vec(prop_oneof![Just("0"), Just("3"), Just("Acme")], 0..3),
        proptest::collection::vec(prop_oneof![Just("1"), Just("Mice")], 0..2),
        proptest::option::of(0.0f64..300.0),
        proptest::option::of(100.0f64..600.0),
        any::<bool>(),
        prop_oneof![Just(""), Just("  "), Just("a"), Just("LOG"), Just("mice")],
    )
        .prop_map(|(brands, categories, min, max, in_stock, search)| {
            FilterState::new()
                .with_brands(brands)
                .with_categories(categories)
                .with_price_range(min, max)
                .with_in_stock_only(in_stock)
                .with_search(search)
        })
}

fn toggles_strategy() -> impl Strategy<Value = FacetToggles> {
    (any::<bool>(), any::<bool>()).prop_map(|(brand, category)| FacetToggles { brand, category })
}

/// Check that `sub` appears in `full` in order.
fn is_subsequence(sub: &[Product], full: &[Product]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|item| rest.any(|candidate| candidate == item))
}

proptest! {
    /// Filtering never adds products and keeps input order.
    #[test]
    fn filter_result_is_ordered_subsequence(
        products in proptest::collection::vec(product_strategy(), 0..30),
        state in state_strategy(),
    ) {
        let result = apply_filters(&products, &state);
        prop_assert!(result.len() <= products.len());
        prop_assert!(is_subsequence(&result, &products));
        prop_assert!(result.iter().all(|p| state.matches(p)));
    }

    /// The default state keeps every product in order.
    #[test]
    fn default_state_is_identity(products in proptest::collection::vec(product_strategy(), 0..30)) {
        prop_assert_eq!(apply_filters(&products, &FilterState::new()), products);
    }

    /// Deriving facets twice gives the same output, without duplicate keys.
    #[test]
    fn facets_are_deterministic(products in proptest::collection::vec(product_strategy(), 0..30)) {
        let first = derive_facets(&products);
        prop_assert_eq!(&first, &derive_facets(&products));

        for facets in [&first.brands, &first.categories] {
            let mut ids: Vec<&str> = facets.iter().map(|f| f.id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
            prop_assert!(facets.iter().all(|f| !f.id.is_empty()));
        }

        prop_assert!(first.price_bounds.min >= 0.0);
        prop_assert!(first.price_bounds.min <= first.price_bounds.max || products.is_empty());
    }

    /// The chip row and the badge count always agree.
    #[test]
    fn chips_match_count(state in state_strategy(), toggles in toggles_strategy()) {
        let chips = derive_chips(&state, &FacetLookup::default(), &FacetLookup::default(), toggles);
        prop_assert_eq!(chips.len(), active_filter_count(&state, toggles));
    }

    /// Removing any chip lowers the count by exactly one.
    #[test]
    fn removing_a_chip_reverts_one_unit(state in state_strategy()) {
        let toggles = FacetToggles::all();
        let count = active_filter_count(&state, toggles);
        let chips = derive_chips(&state, &FacetLookup::default(), &FacetLookup::default(), toggles);

        for chip in &chips {
            let next = remove_chip(&state, chip);
            prop_assert_eq!(active_filter_count(&next, toggles), count - 1);
        }
    }

    /// Filtering a listing section by section matches filtering the flat list.
    #[test]
    fn grouped_filtering_matches_flat_filtering(
        products in proptest::collection::vec(product_strategy(), 0..30),
        state in state_strategy(),
    ) {
        let payload = build_listing(ListingKind::Brand, products);
        let flat = apply_filters(&payload.all_products(), &state);
        let grouped: Vec<Product> = payload
            .filtered(&state)
            .into_iter()
            .flat_map(|group| group.products)
            .collect();

        prop_assert_eq!(grouped, flat);
    }
}

#[test]
fn search_scenario() {
    let mut keyboard = Product::new(1, "Keyboard K1");
    keyboard.brand_name = Some("Logitech".to_string());
    let mut mouse = Product::new(2, "Mouse M1");
    mouse.brand_name = Some("Razer".to_string());

    let state = FilterState::new().with_search("log");
    assert_eq!(apply_filters(&[keyboard.clone(), mouse], &state), vec![keyboard]);
}

#[test]
fn empty_input_facets() {
    assert_eq!(
        derive_facets(&[]),
        FacetSet {
            brands: Vec::new(),
            categories: Vec::new(),
            price_bounds: PriceBounds { min: 0.0, max: 0.0 },
        }
    );
}

#[test]
fn chip_removal_inverse_for_price() {
    let state = FilterState::new()
        .with_categories(["4"])
        .with_price_range(Some(10.0), Some(100.0))
        .with_in_stock_only(true);
    let chips = derive_chips(
        &state,
        &FacetLookup::default(),
        &FacetLookup::default(),
        FacetToggles::default(),
    );
    let price_chip = chips
        .iter()
        .find(|chip| matches!(chip, FilterChip::Price { .. }))
        .unwrap();

    let next = remove_chip(&state, price_chip);
    assert_eq!(next, FilterState { min_price: None, max_price: None, ..state });
}
