// ---------------------------------------------------------------------------
// Price ranges
// ---------------------------------------------------------------------------
//
// Bucket labels are generated from ascending breakpoints:
//   [25, 50]  =>  "0-25", "25-50", "50+"
//
// Buckets are lower-inclusive and upper-exclusive, so a price equal to a
// breakpoint lands in the bucket that starts there.
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::types::Item;

/// Parsed bounds of a range label. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
	pub min: Option<f64>,
	pub max: Option<f64>,
}

impl PriceBounds {
	pub fn contains(&self, price: f64) -> bool {
		if let Some(min) = self.min {
			if price < min {
				return false;
			}
		}
		if let Some(max) = self.max {
			if price >= max {
				return false;
			}
		}
		true
	}

	pub fn is_unbounded(&self) -> bool {
		self.min.is_none() && self.max.is_none()
	}
}

/// Build `N + 1` labels for `N` breakpoints. No breakpoints, no labels.
pub fn generate_ranges(breakpoints: &[f64]) -> Vec<String> {
	let Some((first, rest)) = breakpoints.split_first() else {
		return Vec::new();
	};

	let mut ranges = Vec::with_capacity(breakpoints.len() + 1);
	ranges.push(format!("0-{first}"));
	let mut lower = *first;
	for upper in rest {
		ranges.push(format!("{lower}-{upper}"));
		lower = *upper;
	}
	ranges.push(format!("{lower}+"));
	ranges
}

/// Parse a range label.
///
/// - `"500+"` => `{min: 500, max: None}`
/// - `"25-50"` => `{min: 25, max: 50}`
/// - `"-50"` / `"25-"` => one side open
/// - a bare number is a lower bound
///
/// Anything unparseable leaves that side open, so a garbage label
/// matches every price. A label with more than one `-` is malformed and
/// opens both sides.
pub fn parse_range(label: &str) -> PriceBounds {
	let label = label.trim();
	if label.is_empty() {
		return PriceBounds::default();
	}

	if let Some(min) = label.strip_suffix('+') {
		return PriceBounds {
			min: parse_bound(min),
			max: None,
		};
	}

	match label.split_once('-') {
		Some((_, max)) if max.contains('-') => PriceBounds::default(),
		Some((min, max)) => PriceBounds {
			min: parse_bound(min),
			max: parse_bound(max),
		},
		None => PriceBounds {
			min: parse_bound(label),
			max: None,
		},
	}
}

fn parse_bound(raw: &str) -> Option<f64> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Price used for range matching; items without any price count as 0.
pub fn item_price(item: &Item) -> f64 {
	item.effective_price().unwrap_or(0.0)
}

/// No selected range matches everything.
pub fn matches_price_range(item: &Item, range: Option<&str>) -> bool {
	match range {
		None => true,
		Some(label) => parse_range(label).contains(item_price(item)),
	}
}
