use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use collection_ui_core::content::load_items;
use collection_ui_core::retired::is_retired_now;
use collection_ui_core::stats::{items_with_status, recent_additions};
use collection_ui_core::{
	CollectionStats, Config, FilterEngine, FilterEngineOptions, Item, MemoryLocation, PriceBasis,
	SortKey, SystemClock, sort_items,
};
use serde::Serialize;

use crate::cli::Page;

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedItem {
	pub id: String,
	pub name: String,
	pub price: Option<f64>,
	pub path: String,
	pub tags: Vec<String>,
	pub retired: bool,
}

impl ListedItem {
	fn from_item(item: &Item) -> Self {
		Self {
			id: item.id.clone(),
			name: item.name.clone(),
			price: item.effective_price(),
			path: item.page_path(),
			tags: item.tags.clone(),
			retired: is_retired_now(item.year_retired, &SystemClock),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReport {
	pub href: String,
	pub sort: SortKey,
	pub total: usize,
	pub matched: usize,
	pub has_active_filters: bool,
	pub value: String,
	pub available_tags: Vec<String>,
	pub items: Vec<ListedItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentItem {
	pub id: String,
	pub name: String,
	pub date_added: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
	#[serde(flatten)]
	pub stats: CollectionStats,
	pub collection_value_label: String,
	pub wishlist_value_label: String,
	pub recent: Vec<RecentItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsReport {
	pub currency: String,
	pub price_ranges: Vec<String>,
	pub age_buckets: Vec<String>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
	match path {
		Some(path) => Config::load(path)
			.with_context(|| format!("failed to load config from {}", path.display())),
		None => Ok(Config::default()),
	}
}

pub fn load_catalog(content: &Path) -> anyhow::Result<Vec<Item>> {
	load_items(content).with_context(|| format!("failed to load items from {}", content.display()))
}

/// Run one list page: partition by status, seed filters from `query`,
/// filter, then sort.
pub fn list(
	catalog: &[Item],
	config: &Config,
	page: Page,
	query: &str,
	sort: SortKey,
) -> ListReport {
	let items = Arc::new(items_with_status(catalog, page.status()));
	let query = query.trim_start_matches('?');
	let href = if query.is_empty() {
		page.path().to_string()
	} else {
		format!("{}?{}", page.path(), query)
	};
	let location = Rc::new(RefCell::new(MemoryLocation::from_href(&href)));

	let engine = FilterEngine::new(
		items,
		FilterEngineOptions::default()
			.with_config(config.filters.clone())
			.with_location(Rc::clone(&location)),
	);

	let filtered = engine.filtered_items();
	let sorted = sort_items(&filtered, sort);
	let value = engine.filtered_total_value(PriceBasis::for_status(page.status()));

	tracing::info!(
		page = page.path(),
		total = engine.total_len(),
		matched = sorted.len(),
		"list page rendered"
	);

	let href = location.borrow().href();
	ListReport {
		href,
		sort,
		total: engine.total_len(),
		matched: sorted.len(),
		has_active_filters: engine.has_active_filters(),
		value: config.site.format_price(value),
		available_tags: engine.available_tags().to_vec(),
		items: sorted.into_iter().map(ListedItem::from_item).collect(),
	}
}

pub fn stats(catalog: &[Item], config: &Config, recent: usize) -> StatsReport {
	let stats = CollectionStats::compute(catalog);
	StatsReport {
		collection_value_label: config.site.format_price(stats.collection_value),
		wishlist_value_label: config.site.format_price(stats.wishlist_value),
		stats,
		recent: recent_additions(catalog, recent)
			.into_iter()
			.map(|item| RecentItem {
				id: item.id.clone(),
				name: item.name.clone(),
				date_added: item.date_added.clone(),
			})
			.collect(),
	}
}

pub fn options(config: &Config) -> OptionsReport {
	OptionsReport {
		currency: config.site.currency.clone(),
		price_ranges: collection_ui_core::price_range::generate_ranges(
			&config.filters.price_breakpoints,
		),
		age_buckets: config
			.filters
			.age_buckets
			.iter()
			.map(|b| b.label.clone())
			.collect(),
	}
}
