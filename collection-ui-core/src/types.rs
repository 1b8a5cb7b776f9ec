use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::retired::is_retired;

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
	Owned,
	Wishlist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLink {
	pub url: String,
	pub name: Option<String>,
}

impl ItemLink {
	/// Text shown for the link on a detail page.
	pub fn label(&self) -> String {
		crate::links::format_link_label(&self.url, self.name.as_deref())
	}
}

/// One collectible, as resolved from the content layer.
///
/// Deserialization goes through [`ItemRecord`], which accepts the older
/// content keys and blank prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord")]
pub struct Item {
	pub id: String,
	pub name: String,
	pub category: Option<String>,
	pub status: ItemStatus,
	#[serde(rename = "isGift")]
	pub is_gift: bool,
	pub tags: Vec<String>,
	/// List price.
	#[serde(rename = "referenceRetailPrice")]
	pub reference_price: Option<f64>,
	/// What was actually paid.
	#[serde(rename = "genuinePrice")]
	pub paid_price: Option<f64>,
	pub notes: Option<String>,
	pub images: Vec<String>,
	#[serde(rename = "dateAdded")]
	pub date_added: String,
	#[serde(rename = "dateBought")]
	pub date_bought: Option<String>,
	#[serde(rename = "setId")]
	pub set_id: Option<String>,
	#[serde(rename = "partCount")]
	pub part_count: Option<u32>,
	#[serde(rename = "minifigCount")]
	pub minifig_count: Option<u32>,
	#[serde(rename = "yearReleased")]
	pub year_released: Option<i32>,
	#[serde(rename = "yearRetired")]
	pub year_retired: Option<i32>,
	pub links: Vec<ItemLink>,
}

/// Item as written in a content file.
///
/// Files created before the pricing migration carry `retailPrice` and
/// `purchasePrice`; migrated files may carry both the old and the new key.
/// The new key wins when both are set.
#[derive(Deserialize)]
struct ItemRecord {
	id: String,
	name: String,
	#[serde(default)]
	category: Option<String>,
	status: ItemStatus,
	#[serde(rename = "isGift", default)]
	is_gift: bool,
	#[serde(default)]
	tags: Vec<String>,
	#[serde(rename = "referenceRetailPrice", default, deserialize_with = "blank_as_none")]
	reference_retail_price: Option<f64>,
	#[serde(rename = "retailPrice", default, deserialize_with = "blank_as_none")]
	retail_price: Option<f64>,
	#[serde(rename = "genuinePrice", default, deserialize_with = "blank_as_none")]
	genuine_price: Option<f64>,
	#[serde(rename = "purchasePrice", default, deserialize_with = "blank_as_none")]
	purchase_price: Option<f64>,
	#[serde(default)]
	notes: Option<String>,
	#[serde(default)]
	images: Vec<String>,
	#[serde(rename = "dateAdded")]
	date_added: String,
	#[serde(rename = "dateBought", default)]
	date_bought: Option<String>,
	#[serde(rename = "setId", default)]
	set_id: Option<String>,
	#[serde(rename = "partCount", default)]
	part_count: Option<u32>,
	#[serde(rename = "minifigCount", default)]
	minifig_count: Option<u32>,
	#[serde(rename = "yearReleased", default)]
	year_released: Option<i32>,
	#[serde(rename = "yearRetired", default)]
	year_retired: Option<i32>,
	#[serde(default)]
	links: Vec<ItemLink>,
}

impl From<ItemRecord> for Item {
	fn from(record: ItemRecord) -> Self {
		Self {
			id: record.id,
			name: record.name,
			category: record.category,
			status: record.status,
			is_gift: record.is_gift,
			tags: record.tags,
			reference_price: record.reference_retail_price.or(record.retail_price),
			paid_price: record.genuine_price.or(record.purchase_price),
			notes: record.notes,
			images: record.images,
			date_added: record.date_added,
			date_bought: record.date_bought,
			set_id: record.set_id,
			part_count: record.part_count,
			minifig_count: record.minifig_count,
			year_released: record.year_released,
			year_retired: record.year_retired,
			links: record.links,
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceValue {
	Number(f64),
	Text(String),
}

/// Price that may be missing, null, blank (`''`) or a quoted number.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<PriceValue>::deserialize(deserializer)? {
		None => Ok(None),
		Some(PriceValue::Number(n)) => Ok(Some(n)),
		Some(PriceValue::Text(text)) => {
			let text = text.trim();
			if text.is_empty() {
				return Ok(None);
			}
			text.parse::<f64>()
				.map(Some)
				.map_err(|_| de::Error::custom(format!("invalid price {text:?}")))
		}
	}
}

impl Item {
	/// Minimal record; the remaining fields start empty.
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		status: ItemStatus,
		date_added: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			category: None,
			status,
			is_gift: false,
			tags: Vec::new(),
			reference_price: None,
			paid_price: None,
			notes: None,
			images: Vec::new(),
			date_added: date_added.into(),
			date_bought: None,
			set_id: None,
			part_count: None,
			minifig_count: None,
			year_released: None,
			year_retired: None,
			links: Vec::new(),
		}
	}

	/// Paid price if known, otherwise the reference price. Never negative.
	pub fn effective_price(&self) -> Option<f64> {
		self.paid_price.or(self.reference_price).map(|p| p.max(0.0))
	}

	pub fn is_retired_at(&self, current_year: i32) -> bool {
		is_retired(self.year_retired, current_year)
	}

	/// Route of the generated detail page.
	pub fn page_path(&self) -> String {
		format!("/item/{}/", self.id)
	}

	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.iter().any(|t| t == tag)
	}
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Status selector carried on the filter state.
///
/// Pages partition items by status before they reach the engine, so the
/// pipeline never reads this field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
	#[default]
	All,
	Owned,
	Wishlist,
}

/// Current filter selection. Inactive fields hold their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
	pub search: String,
	pub tags: Vec<String>,
	#[serde(rename = "priceRange")]
	pub price_range: Option<String>,
	#[serde(rename = "ageBucket")]
	pub age_bucket: Option<String>,
	pub status: StatusFilter,
	#[serde(rename = "giftOnly")]
	pub gift_only: bool,
}

impl FilterState {
	/// True when any applied filter differs from its default.
	pub fn has_active_filters(&self) -> bool {
		!self.search.is_empty()
			|| !self.tags.is_empty()
			|| self.price_range.is_some()
			|| self.age_bucket.is_some()
			|| self.gift_only
	}
}
