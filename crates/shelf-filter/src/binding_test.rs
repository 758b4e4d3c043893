use serde_json::json;

use super::*;
use crate::controller::ShopController;
use crate::state::PriceInput;

fn scenario_catalog() -> Vec<CatalogItem> {
    serde_json::from_value(json!([
        {"name": "A", "category": "Fiction", "discountPrice": "$10.00", "ratings": 4.2},
        {"name": "B", "category": "Myth", "oldPrice": 20, "ratings": 2}
    ]))
    .expect("catalog")
}

fn rating(n: u8) -> RatingThreshold {
    RatingThreshold::try_from(n).expect("valid threshold")
}

fn chip_labels(view: &ShopView<'_>) -> Vec<String> {
    view.chips.iter().map(|chip| chip.label.clone()).collect()
}

#[test]
fn loading_view_has_no_empty_state() {
    let controller = ShopController::new();
    let view = controller.view();
    assert_eq!(view.status, StatusView::Loading);
    assert!(view.results.is_empty());
    assert!(view.empty_state.is_none());
}

#[test]
fn failed_view_offers_retry() {
    let mut controller = ShopController::new();
    controller.on_catalog(CatalogStatus::Failed("server returned 500".into()));
    let view = controller.view();
    assert_eq!(
        view.status,
        StatusView::Error {
            message: "server returned 500".into(),
            retry_label: RETRY_LABEL,
        }
    );
    assert!(view.empty_state.is_none());
}

#[test]
fn sidebar_lists_price_then_facets_then_ratings() {
    let controller = ShopController::with_catalog(scenario_catalog());
    let view = controller.view();

    assert_eq!(view.sidebar.len(), 3, "no type facet in this catalog");
    assert_eq!(
        view.sidebar[0],
        SectionView::Price {
            expanded: true,
            min_input: "10".into(),
            max_input: "20".into(),
            range_label: "Range: $10 - $20".into(),
        }
    );
    assert_eq!(
        view.sidebar[1],
        SectionView::Categories {
            expanded: true,
            options: vec![
                OptionView { value: "Fiction".into(), checked: false },
                OptionView { value: "Myth".into(), checked: false },
            ],
        }
    );
    assert!(matches!(view.sidebar[2], SectionView::Ratings { .. }));
}

#[test]
fn rating_options_run_from_four_down_to_one() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.toggle_rating(rating(3));
    let view = controller.view();

    let Some(SectionView::Ratings { options, .. }) = view.sidebar.last() else {
        panic!("ratings section should be last");
    };
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["4 & Up", "3 & Up", "2 & Up", "1 & Up"]);
    let checked: Vec<u8> = options
        .iter()
        .filter(|o| o.checked)
        .map(|o| o.stars)
        .collect();
    assert_eq!(checked, vec![3]);
}

#[test]
fn collapsed_section_is_reported() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.toggle_section(crate::state::Section::Price);
    let view = controller.view();
    assert!(matches!(
        view.sidebar[0],
        SectionView::Price { expanded: false, .. }
    ));
}

#[test]
fn chips_follow_selections_and_single_price_chip() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.toggle_category("Myth");
    controller.toggle_type("ebook");
    controller.toggle_rating(rating(2));
    controller.set_price(PriceInput::Min, "12");
    controller.set_price(PriceInput::Max, "18");

    let view = controller.view();
    assert_eq!(
        chip_labels(&view),
        vec![
            "Category: Myth",
            "Type: ebook",
            "Rating: 2+",
            "Price: $12 - $18",
        ]
    );
    assert_eq!(view.chips[3].action, ChipAction::ResetPrice);
    // Both price boundaries count towards the badge, the chip appears once.
    assert_eq!(view.filter_badge, Some(5));
}

#[test]
fn price_chip_fills_an_empty_input_from_the_bound() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.set_price(PriceInput::Min, "");
    controller.set_price(PriceInput::Max, "15");

    let view = controller.view();
    assert_eq!(chip_labels(&view), vec!["Price: $10 - $15"]);
    assert_eq!(view.filter_badge, Some(1));

    controller.set_price(PriceInput::Min, "12");
    controller.set_price(PriceInput::Max, "");
    assert_eq!(chip_labels(&controller.view()), vec!["Price: $12 - $20"]);
}

#[test]
fn badge_hidden_and_no_chips_at_defaults() {
    let controller = ShopController::with_catalog(scenario_catalog());
    let view = controller.view();
    assert!(view.chips.is_empty());
    assert_eq!(view.filter_badge, None);
    assert_eq!(view.results_title, "All");
    assert!(view.search_banner.is_none());
}

#[test]
fn dismissing_every_chip_clears_the_badge() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.toggle_category("Fiction");
    controller.toggle_rating(rating(4));
    controller.set_price(PriceInput::Max, "15");

    let actions: Vec<ChipAction> = controller
        .view()
        .chips
        .into_iter()
        .map(|chip| chip.action)
        .collect();
    for action in &actions {
        controller.dismiss_chip(action);
    }

    let view = controller.view();
    assert!(view.chips.is_empty());
    assert_eq!(view.filter_badge, None);
}

#[test]
fn search_sets_banner_and_title() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.on_location_change("?search=myth");
    let view = controller.view();
    assert_eq!(
        view.search_banner.as_deref(),
        Some("Showing 1 results for \"myth\"")
    );
    assert_eq!(view.results_title, "Search Results for \"myth\"");
    assert_eq!(view.results.len(), 1);
    assert!(view.empty_state.is_none());
}

#[test]
fn empty_search_result_offers_clear_action() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.set_search_term("zzz");
    let view = controller.view();
    assert!(view.search_banner.is_none());
    let empty = view.empty_state.expect("empty state");
    assert_eq!(empty.title, "No books found");
    assert!(empty.message.contains("\"zzz\""));
    assert_eq!(empty.clear_label, Some(CLEAR_SEARCH_AND_FILTERS_LABEL));
}

#[test]
fn empty_catalog_reports_no_books_available() {
    let controller = ShopController::with_catalog(Vec::new());
    let view = controller.view();
    assert_eq!(view.status, StatusView::Ready);
    let empty = view.empty_state.expect("empty state");
    assert_eq!(empty.title, "No books available");
    assert_eq!(empty.clear_label, None);
    assert_eq!(view.sidebar.len(), 2, "only price and ratings sections");
}

#[test]
fn mobile_drawer_flag_is_passed_through() {
    let mut controller = ShopController::with_catalog(scenario_catalog());
    controller.set_mobile_filters_open(true);
    assert!(controller.view().mobile_filters_open);
}

#[test]
fn chip_action_serializes_with_tag_and_value() {
    let toggle = serde_json::to_value(ChipAction::ToggleCategory("Myth".into())).expect("json");
    assert_eq!(toggle, json!({"action": "toggle_category", "value": "Myth"}));

    let by_rating = serde_json::to_value(ChipAction::ToggleRating(rating(4))).expect("json");
    assert_eq!(by_rating, json!({"action": "toggle_rating", "value": 4}));

    let reset = serde_json::to_value(ChipAction::ResetPrice).expect("json");
    assert_eq!(reset, json!({"action": "reset_price"}));
}

#[test]
fn status_view_serializes_with_state_tag() {
    let value = serde_json::to_value(StatusView::Error {
        message: "boom".into(),
        retry_label: RETRY_LABEL,
    })
    .expect("json");
    assert_eq!(
        value,
        json!({"state": "error", "message": "boom", "retry_label": "Retry"})
    );
}
