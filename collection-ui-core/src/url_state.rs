// ---------------------------------------------------------------------------
// URL state
// ---------------------------------------------------------------------------
//
// Filter state <-> query string:
//   q=<search>  tags=a,b  price=<range>  age=<bucket>  gift=true
//
// Inactive fields are omitted. Unknown parameters are ignored on read.
// ---------------------------------------------------------------------------

use std::cell::RefCell;
use std::rc::Rc;

use url::form_urlencoded;

use crate::types::FilterState;

pub const PARAM_SEARCH: &str = "q";
pub const PARAM_TAGS: &str = "tags";
pub const PARAM_PRICE: &str = "price";
pub const PARAM_AGE: &str = "age";
pub const PARAM_GIFT: &str = "gift";

/// Ordered query parameters. Lookups return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse `?a=1&b=2` (leading `?` optional).
	pub fn from_query_string(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		Self(
			form_urlencoded::parse(query.as_bytes())
				.map(|(k, v)| (k.into_owned(), v.into_owned()))
				.collect(),
		)
	}

	/// Encode without the leading `?`.
	pub fn to_query_string(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (k, v) in &self.0 {
			serializer.append_pair(k, v);
		}
		serializer.finish()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Replace every value for `key` with a single one.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.0.retain(|(k, _)| *k != key);
		self.0.push((key, value.into()));
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Encode the active fields of `state`. `status` is never written.
pub fn serialize_state(state: &FilterState) -> QueryParams {
	let mut params = QueryParams::new();
	if !state.search.is_empty() {
		params.set(PARAM_SEARCH, state.search.as_str());
	}
	if !state.tags.is_empty() {
		params.set(PARAM_TAGS, state.tags.join(","));
	}
	if let Some(range) = state.price_range.as_deref().filter(|r| !r.is_empty()) {
		params.set(PARAM_PRICE, range);
	}
	if let Some(bucket) = state.age_bucket.as_deref().filter(|b| !b.is_empty()) {
		params.set(PARAM_AGE, bucket);
	}
	if state.gift_only {
		params.set(PARAM_GIFT, "true");
	}
	params
}

/// Decode filter state. Absent or empty parameters keep the default.
pub fn parse_state(params: &QueryParams) -> FilterState {
	let mut state = FilterState::default();

	if let Some(search) = non_empty(params.get(PARAM_SEARCH)) {
		state.search = search.to_string();
	}
	if let Some(tags) = non_empty(params.get(PARAM_TAGS)) {
		state.tags = tags
			.split(',')
			.filter(|t| !t.is_empty())
			.map(str::to_string)
			.collect();
	}
	if let Some(price) = non_empty(params.get(PARAM_PRICE)) {
		state.price_range = Some(price.to_string());
	}
	if let Some(age) = non_empty(params.get(PARAM_AGE)) {
		state.age_bucket = Some(age.to_string());
	}
	state.gift_only = params.get(PARAM_GIFT) == Some("true");

	state
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Location boundary
// ---------------------------------------------------------------------------

/// The host's navigable URL.
///
/// `write` replaces the current query in place: no navigation and no new
/// history entry.
pub trait UrlSync {
	fn read(&self) -> QueryParams;
	fn write(&mut self, params: &QueryParams);
}

/// In-memory location, used by non-browser hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
	path: String,
	query: String,
	writes: usize,
}

impl MemoryLocation {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	/// Split `"/collection/?q=x"` into path and query.
	pub fn from_href(href: &str) -> Self {
		let (path, query) = match href.split_once('?') {
			Some((path, query)) => (path, query),
			None => (href, ""),
		};
		Self {
			path: path.to_string(),
			query: query.to_string(),
			writes: 0,
		}
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	/// Path plus `?query`, or the bare path when the query is empty.
	pub fn href(&self) -> String {
		if self.query.is_empty() {
			self.path.clone()
		} else {
			format!("{}?{}", self.path, self.query)
		}
	}

	/// Number of in-place replacements so far.
	pub fn writes(&self) -> usize {
		self.writes
	}
}

impl UrlSync for MemoryLocation {
	fn read(&self) -> QueryParams {
		QueryParams::from_query_string(&self.query)
	}

	fn write(&mut self, params: &QueryParams) {
		self.query = params.to_query_string();
		self.writes += 1;
	}
}

/// Lets a host keep a handle on the location it gave to an engine.
impl<T: UrlSync> UrlSync for Rc<RefCell<T>> {
	fn read(&self) -> QueryParams {
		self.borrow().read()
	}

	fn write(&mut self, params: &QueryParams) {
		self.borrow_mut().write(params);
	}
}
