use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::age_bucket::parse_date;
use crate::error::CollectionError;
use crate::types::Item;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
	#[default]
	#[serde(rename = "name-asc")]
	NameAsc,
	#[serde(rename = "name-desc")]
	NameDesc,
	#[serde(rename = "price-asc")]
	PriceAsc,
	#[serde(rename = "price-desc")]
	PriceDesc,
	#[serde(rename = "date-asc")]
	DateAsc,
	#[serde(rename = "date-desc")]
	DateDesc,
}

impl SortKey {
	pub const ALL: [SortKey; 6] = [
		Self::NameAsc,
		Self::NameDesc,
		Self::PriceAsc,
		Self::PriceDesc,
		Self::DateAsc,
		Self::DateDesc,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::NameAsc => "name-asc",
			Self::NameDesc => "name-desc",
			Self::PriceAsc => "price-asc",
			Self::PriceDesc => "price-desc",
			Self::DateAsc => "date-asc",
			Self::DateDesc => "date-desc",
		}
	}

	/// Comparator for this key, ascending or descending as named.
	pub fn compare(self, a: &Item, b: &Item) -> Ordering {
		match self {
			Self::NameAsc => compare_names(&a.name, &b.name),
			Self::NameDesc => compare_names(&b.name, &a.name),
			Self::PriceAsc => price_of(a).total_cmp(&price_of(b)),
			Self::PriceDesc => price_of(b).total_cmp(&price_of(a)),
			Self::DateAsc => parse_date(&a.date_added).cmp(&parse_date(&b.date_added)),
			Self::DateDesc => parse_date(&b.date_added).cmp(&parse_date(&a.date_added)),
		}
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SortKey {
	type Err = CollectionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|key| key.as_str() == s)
			.ok_or_else(|| CollectionError::InvalidSortKey(s.to_string()))
	}
}

fn price_of(item: &Item) -> f64 {
	item.effective_price().unwrap_or(0.0)
}

/// Name ordering for list pages.
///
/// Names compare on their accent- and case-folded form first, so `"apple"`
/// sorts next to `"Apple"` and `"Éclair"` next to `"eclair"`. Ties fall
/// back to accent-sensitive folding and then to the raw strings.
pub fn compare_names(a: &str, b: &str) -> Ordering {
	collation_key(a)
		.cmp(collation_key(b))
		.then_with(|| lowercase(a).cmp(lowercase(b)))
		.then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> impl Iterator<Item = char> + '_ {
	name.nfd()
		.filter(|c| !is_combining_mark(*c))
		.flat_map(char::to_lowercase)
}

fn lowercase(name: &str) -> impl Iterator<Item = char> + '_ {
	name.chars().flat_map(char::to_lowercase)
}

/// Sorted copy of `items`; the input is left untouched.
///
/// The sort is stable. Items whose `dateAdded` does not parse compare
/// below every valid date, so they lead ascending date sorts and trail
/// descending ones.
pub fn sort_items<T>(items: &[T], key: SortKey) -> Vec<T>
where
	T: Borrow<Item> + Clone,
{
	let mut sorted = items.to_vec();
	sorted.sort_by(|a, b| key.compare(a.borrow(), b.borrow()));
	sorted
}
