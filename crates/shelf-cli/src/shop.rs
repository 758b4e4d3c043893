//! `facets` and `filter` command handlers.
//!
//! Both load one catalog snapshot, hand it to a [`ShopController`] and print
//! what the shop page would show.

use shelf_core::{AppConfig, CatalogItem};
use shelf_filter::binding::SectionView;
use shelf_filter::{
    effective_price, shop_location, CatalogStatus, FacetSet, Navigator, PriceInput,
    RecordingNavigator, ShopController, ShopView,
};
use shelf_source::{CatalogSource, HttpCatalogSource};

use crate::{FilterArgs, SourceArgs};

/// Base delay between re-issued fetches.
const RETRY_BACKOFF_SECS: u64 = 1;

const NAME_WIDTH: usize = 40;

pub(crate) fn resolve_source(
    config: &AppConfig,
    args: &SourceArgs,
) -> anyhow::Result<CatalogSource> {
    if let Some(api_url) = &args.api_url {
        let client = HttpCatalogSource::new(api_url, config.http_timeout_secs, &config.user_agent)?;
        return Ok(CatalogSource::Http(client));
    }
    if args.remote {
        return Ok(CatalogSource::Http(HttpCatalogSource::from_config(config)?));
    }
    let path = args
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_path.clone());
    Ok(CatalogSource::File(path))
}

/// Loads a snapshot into a fresh controller, failing when the catalog is
/// unavailable.
async fn load_controller(source: &CatalogSource, retries: u32) -> anyhow::Result<ShopController> {
    let mut controller = ShopController::new();
    controller.on_catalog(source.status(retries, RETRY_BACKOFF_SECS).await);

    if let CatalogStatus::Failed(message) = controller.status() {
        anyhow::bail!(
            "catalog unavailable from {}: {message}; retry with --retries",
            source.describe()
        );
    }
    Ok(controller)
}

/// Applies CLI selections as shopper actions. The search term goes through
/// the shop URL, as it would when arriving from the header search box.
pub(crate) fn apply_filter_args(
    controller: &mut ShopController,
    filters: &FilterArgs,
    navigator: &mut impl Navigator,
) {
    if let Some(term) = filters.search.as_deref().filter(|t| !t.is_empty()) {
        let location = shop_location(Some(term));
        navigator.navigate(&location);
        let query = location.split_once('?').map_or("", |(_, query)| query);
        controller.on_location_change(query);
    }

    for category in &filters.categories {
        if !controller.state().categories.contains(category) {
            controller.toggle_category(category);
        }
    }
    for item_type in &filters.types {
        if !controller.state().types.contains(item_type) {
            controller.toggle_type(item_type);
        }
    }
    for threshold in &filters.ratings {
        if !controller.state().ratings.contains(threshold) {
            controller.toggle_rating(*threshold);
        }
    }

    if let Some(min) = &filters.min_price {
        controller.set_price(PriceInput::Min, min);
    }
    if let Some(max) = &filters.max_price {
        controller.set_price(PriceInput::Max, max);
    }
}

pub(crate) async fn run_facets(
    config: &AppConfig,
    source: &SourceArgs,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = resolve_source(config, source)?;
    let controller = load_controller(&catalog, source.retries).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(controller.facets())?);
    } else {
        print!("{}", render_facets(controller.facets()));
    }
    Ok(())
}

pub(crate) async fn run_filter(
    config: &AppConfig,
    source: &SourceArgs,
    filters: &FilterArgs,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = resolve_source(config, source)?;
    let mut controller = load_controller(&catalog, source.retries).await?;
    let mut navigator = RecordingNavigator::default();
    apply_filter_args(&mut controller, filters, &mut navigator);

    tracing::debug!(
        location = navigator.current().unwrap_or(shelf_filter::SHOP_ROUTE),
        active_filters = controller.active_filter_count(),
        "filter selections applied"
    );

    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view(&view));
    }
    Ok(())
}

pub(crate) fn render_facets(facets: &FacetSet) -> String {
    let bounds = facets.price_bounds;
    format!(
        "PRICE RANGE  ${} - ${}\nCATEGORIES   {}\nTYPES        {}\n",
        bounds.min,
        bounds.max,
        join_or_none(&facets.categories),
        join_or_none(&facets.types)
    )
}

pub(crate) fn render_view(view: &ShopView<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(SectionView::Price { range_label, .. }) = view.sidebar.first() {
        lines.push(range_label.clone());
    }
    if !view.chips.is_empty() {
        let labels: Vec<&str> = view.chips.iter().map(|chip| chip.label.as_str()).collect();
        let count = view
            .filter_badge
            .map_or_else(String::new, |count| format!(" ({count})"));
        lines.push(format!("Active filters{count}: {}", labels.join(", ")));
    }
    lines.extend(view.search_banner.iter().cloned());
    lines.push(view.results_title.clone());
    lines.push(String::new());

    if let Some(empty) = &view.empty_state {
        lines.push(empty.title.clone());
        lines.push(empty.message.clone());
    } else {
        lines.push(format!(
            "{:<w$}  {:<20}{:<14}{:<12}{:>10}  RATING",
            "NAME",
            "WRITER",
            "CATEGORY",
            "TYPE",
            "PRICE",
            w = NAME_WIDTH
        ));
        lines.extend(view.results.iter().map(|item| render_row(item)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_row(item: &CatalogItem) -> String {
    let price = effective_price(item);
    let price = if price > 0.0 {
        format!("${price:.2}")
    } else {
        "-".to_owned()
    };
    format!(
        "{:<w$}  {:<20}{:<14}{:<12}{:>10}  {:.1}",
        truncate(item.name().unwrap_or("(untitled)"), NAME_WIDTH),
        truncate(item.writer().unwrap_or("-"), 18),
        truncate(item.category().unwrap_or("-"), 12),
        truncate(item.item_type().unwrap_or("-"), 10),
        price,
        item.rating(),
        w = NAME_WIDTH
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_owned()
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_owned()
    } else {
        values.join(", ")
    }
}
