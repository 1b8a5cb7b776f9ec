// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------
//
// Owns the filter state for one list page and keeps the derived list in
// step with it. Every committed change re-runs the pipeline
//
//   search (>= 2 chars, reorders) -> tags -> price -> age -> gift
//
// and, when a location is attached, rewrites its query string in place.
// ---------------------------------------------------------------------------

use std::sync::Arc;

use crate::age_bucket::matches_age_bucket;
use crate::clock::{Clock, SystemClock};
use crate::config::{AgeBucket, FiltersConfig};
use crate::price_range::{generate_ranges, matches_price_range};
use crate::stats::{PriceBasis, total_value};
use crate::tags::{available_tags, matches_tags};
use crate::text_search::{FuzzyIndex, MIN_QUERY_LEN, SearchProvider};
use crate::types::{FilterState, Item, StatusFilter};
use crate::url_state::{UrlSync, parse_state, serialize_state};

/// Collaborators and switches for a [`FilterEngine`].
pub struct FilterEngineOptions {
	pub config: FiltersConfig,
	/// Mirror the state into `location`. Ignored when no location is given.
	pub sync_url: bool,
	pub location: Option<Box<dyn UrlSync>>,
	pub clock: Box<dyn Clock>,
	pub search: Box<dyn SearchProvider>,
}

impl Default for FilterEngineOptions {
	fn default() -> Self {
		Self {
			config: FiltersConfig::default(),
			sync_url: true,
			location: None,
			clock: Box::new(SystemClock),
			search: Box::new(FuzzyIndex::default()),
		}
	}
}

impl FilterEngineOptions {
	pub fn with_config(mut self, config: FiltersConfig) -> Self {
		self.config = config;
		self
	}

	pub fn with_location(mut self, location: impl UrlSync + 'static) -> Self {
		self.location = Some(Box::new(location));
		self
	}

	pub fn with_sync_url(mut self, sync_url: bool) -> Self {
		self.sync_url = sync_url;
		self
	}

	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	pub fn with_search(mut self, search: impl SearchProvider + 'static) -> Self {
		self.search = Box::new(search);
		self
	}
}

pub struct FilterEngine {
	items: Arc<Vec<Item>>,
	config: FiltersConfig,
	state: FilterState,
	search: Box<dyn SearchProvider>,
	location: Option<Box<dyn UrlSync>>,
	clock: Box<dyn Clock>,
	available_tags: Vec<String>,
	price_range_options: Vec<String>,
	/// Positions into `items`, in display order.
	filtered: Vec<usize>,
}

impl FilterEngine {
	/// Build the engine for `items`.
	///
	/// With URL sync on, the initial state is read from the location and
	/// the normalised query is written straight back.
	pub fn new(items: Arc<Vec<Item>>, options: FilterEngineOptions) -> Self {
		let FilterEngineOptions {
			config,
			sync_url,
			location,
			clock,
			mut search,
		} = options;

		let location = if sync_url { location } else { None };
		let state = location
			.as_ref()
			.map(|loc| parse_state(&loc.read()))
			.unwrap_or_default();

		search.rebuild(&items);

		let mut engine = Self {
			available_tags: available_tags(&items),
			price_range_options: generate_ranges(&config.price_breakpoints),
			items,
			config,
			state,
			search,
			location,
			clock,
			filtered: Vec::new(),
		};
		engine.recompute();
		engine.sync_location();
		engine
	}

	/// Engine with default config and no URL.
	pub fn with_defaults(items: Arc<Vec<Item>>) -> Self {
		Self::new(items, FilterEngineOptions::default())
	}

	// -- read side --

	pub fn filters(&self) -> &FilterState {
		&self.state
	}

	pub fn items(&self) -> &Arc<Vec<Item>> {
		&self.items
	}

	pub fn config(&self) -> &FiltersConfig {
		&self.config
	}

	pub fn age_buckets(&self) -> &[AgeBucket] {
		&self.config.age_buckets
	}

	/// Items passing every active filter. Search results come first in
	/// relevance order.
	pub fn filtered_items(&self) -> Vec<&Item> {
		self.filtered.iter().map(|&i| &self.items[i]).collect()
	}

	pub fn filtered_len(&self) -> usize {
		self.filtered.len()
	}

	pub fn total_len(&self) -> usize {
		self.items.len()
	}

	pub fn filtered_total_value(&self, basis: PriceBasis) -> f64 {
		total_value(self.filtered.iter().map(|&i| &self.items[i]), basis)
	}

	pub fn has_active_filters(&self) -> bool {
		self.state.has_active_filters()
	}

	pub fn available_tags(&self) -> &[String] {
		&self.available_tags
	}

	pub fn price_range_options(&self) -> &[String] {
		&self.price_range_options
	}

	pub fn location(&self) -> Option<&dyn UrlSync> {
		self.location.as_deref()
	}

	// -- setters --

	pub fn set_search(&mut self, search: impl Into<String>) {
		let search = search.into();
		self.update(|state| state.search = search);
	}

	/// Add `tag` to the selection, or drop it if already selected.
	pub fn toggle_tag(&mut self, tag: &str) {
		self.update(|state| {
			if let Some(pos) = state.tags.iter().position(|t| t == tag) {
				state.tags.remove(pos);
			} else {
				state.tags.push(tag.to_string());
			}
		});
	}

	pub fn set_tags(&mut self, tags: Vec<String>) {
		self.update(|state| state.tags = tags);
	}

	pub fn set_price_range(&mut self, range: Option<String>) {
		self.update(|state| state.price_range = range);
	}

	pub fn set_age_bucket(&mut self, bucket: Option<String>) {
		self.update(|state| state.age_bucket = bucket);
	}

	pub fn set_gift_only(&mut self, gift_only: bool) {
		self.update(|state| state.gift_only = gift_only);
	}

	/// Stored for callers that read it back; the pipeline ignores it.
	pub fn set_status(&mut self, status: StatusFilter) {
		self.update(|state| state.status = status);
	}

	pub fn reset(&mut self) {
		self.update(|state| *state = FilterState::default());
	}

	/// Swap the item list. The search index and tag list are rebuilt only
	/// when `items` is a different allocation from the current one.
	pub fn set_items(&mut self, items: Arc<Vec<Item>>) {
		if Arc::ptr_eq(&self.items, &items) {
			return;
		}
		self.items = items;
		self.search.rebuild(&self.items);
		self.available_tags = available_tags(&self.items);
		self.recompute();
	}

	pub fn set_config(&mut self, config: FiltersConfig) {
		if config == self.config {
			return;
		}
		if config.price_breakpoints != self.config.price_breakpoints {
			self.price_range_options = generate_ranges(&config.price_breakpoints);
		}
		self.config = config;
		self.recompute();
	}

	/// Re-run the pipeline, e.g. after the clock has moved on.
	pub fn refresh(&mut self) {
		self.recompute();
	}

	// -- internals --

	fn update(&mut self, mutate: impl FnOnce(&mut FilterState)) {
		let mut next = self.state.clone();
		mutate(&mut next);
		if next == self.state {
			return;
		}
		self.state = next;
		self.recompute();
		self.sync_location();
	}

	fn recompute(&mut self) {
		let state = &self.state;
		let searching = state.search.chars().count() >= MIN_QUERY_LEN;
		let candidates: Vec<usize> = if searching {
			self.search.search(&state.search)
		} else {
			(0..self.items.len()).collect()
		};

		let now = self.clock.now();
		let buckets = &self.config.age_buckets;
		let items = &self.items;

		self.filtered = candidates
			.into_iter()
			.filter(|&i| {
				let Some(item) = items.get(i) else {
					return false;
				};
				matches_tags(item, &state.tags)
					&& matches_price_range(item, state.price_range.as_deref())
					&& matches_age_bucket(item, state.age_bucket.as_deref(), buckets, now)
					&& (!state.gift_only || item.is_gift)
			})
			.collect();

		tracing::debug!(
			total = self.items.len(),
			matched = self.filtered.len(),
			searching,
			"filters applied"
		);
	}

	fn sync_location(&mut self) {
		let Some(location) = self.location.as_mut() else {
			return;
		};
		let params = serialize_state(&self.state);
		tracing::debug!(query = %params.to_query_string(), "replacing location query");
		location.write(&params);
	}
}
