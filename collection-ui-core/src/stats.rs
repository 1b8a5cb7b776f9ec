use serde::{Deserialize, Serialize};

use crate::sort::{SortKey, sort_items};
use crate::types::{Item, ItemStatus};

/// Which price a total is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBasis {
	/// Paid price, falling back to the reference price.
	Effective,
	/// Reference price only; what a wishlist would cost at list price.
	Reference,
}

impl PriceBasis {
	/// Owned items are valued at what was paid, wishlist items at list price.
	pub fn for_status(status: ItemStatus) -> Self {
		match status {
			ItemStatus::Owned => Self::Effective,
			ItemStatus::Wishlist => Self::Reference,
		}
	}

	pub fn price_of(self, item: &Item) -> f64 {
		let price = match self {
			Self::Effective => item.effective_price(),
			Self::Reference => item.reference_price.map(|p| p.max(0.0)),
		};
		price.unwrap_or(0.0)
	}
}

pub fn total_value<'a, I>(items: I, basis: PriceBasis) -> f64
where
	I: IntoIterator<Item = &'a Item>,
{
	items.into_iter().map(|item| basis.price_of(item)).sum()
}

/// Items with the given status, in input order.
pub fn items_with_status(items: &[Item], status: ItemStatus) -> Vec<Item> {
	items.iter().filter(|i| i.status == status).cloned().collect()
}

/// Headline numbers shown on every page footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
	pub owned: usize,
	pub wishlist: usize,
	#[serde(rename = "collectionValue")]
	pub collection_value: f64,
	#[serde(rename = "wishlistValue")]
	pub wishlist_value: f64,
}

impl CollectionStats {
	pub fn compute(items: &[Item]) -> Self {
		let mut stats = Self::default();
		for item in items {
			match item.status {
				ItemStatus::Owned => {
					stats.owned += 1;
					stats.collection_value += PriceBasis::Effective.price_of(item);
				}
				ItemStatus::Wishlist => {
					stats.wishlist += 1;
					stats.wishlist_value += PriceBasis::Reference.price_of(item);
				}
			}
		}
		stats
	}

	pub fn total(&self) -> usize {
		self.owned + self.wishlist
	}
}

/// The `n` most recently added items, newest first.
pub fn recent_additions(items: &[Item], n: usize) -> Vec<&Item> {
	let refs: Vec<&Item> = items.iter().collect();
	let mut sorted = sort_items(&refs, SortKey::DateDesc);
	sorted.truncate(n);
	sorted
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(id: &str, status: ItemStatus, reference: Option<f64>, paid: Option<f64>) -> Item {
		let mut item = Item::new(id, id, status, "2024-01-01");
		item.reference_price = reference;
		item.paid_price = paid;
		item
	}

	#[test]
	fn stats_split_by_status() {
		let items = vec![
			item("a", ItemStatus::Owned, Some(100.0), Some(80.0)),
			item("b", ItemStatus::Owned, Some(50.0), None),
			item("c", ItemStatus::Wishlist, Some(200.0), Some(150.0)),
			item("d", ItemStatus::Wishlist, None, Some(10.0)),
		];
		let stats = CollectionStats::compute(&items);
		assert_eq!(stats.owned, 2);
		assert_eq!(stats.wishlist, 2);
		assert_eq!(stats.total(), 4);
		assert!((stats.collection_value - 130.0).abs() < 1e-9);
		assert!((stats.wishlist_value - 200.0).abs() < 1e-9);
	}

	#[test]
	fn empty_stats() {
		assert_eq!(CollectionStats::compute(&[]), CollectionStats::default());
	}

	#[test]
	fn basis_per_status() {
		let it = item("a", ItemStatus::Wishlist, Some(60.0), Some(40.0));
		assert_eq!(PriceBasis::for_status(ItemStatus::Owned).price_of(&it), 40.0);
		assert_eq!(PriceBasis::for_status(ItemStatus::Wishlist).price_of(&it), 60.0);
	}

	#[test]
	fn total_value_over_refs() {
		let items = vec![
			item("a", ItemStatus::Owned, Some(10.0), None),
			item("b", ItemStatus::Owned, None, None),
		];
		let refs: Vec<&Item> = items.iter().collect();
		assert_eq!(total_value(refs, PriceBasis::Effective), 10.0);
	}

	#[test]
	fn recent_additions_newest_first() {
		let mut items = Vec::new();
		for (id, date) in [
			("a", "2024-01-01"),
			("b", "2024-03-01"),
			("c", "2024-02-01"),
			("d", "2023-12-01"),
		] {
			items.push(Item::new(id, id, ItemStatus::Owned, date));
		}
		let recent: Vec<&str> = recent_additions(&items, 2).iter().map(|i| i.id.as_str()).collect();
		assert_eq!(recent, vec!["b", "c"]);
		assert_eq!(recent_additions(&items, 10).len(), 4);
	}

	#[test]
	fn filter_by_status() {
		let items = vec![
			item("a", ItemStatus::Owned, None, None),
			item("b", ItemStatus::Wishlist, None, None),
			item("c", ItemStatus::Owned, None, None),
		];
		let owned = items_with_status(&items, ItemStatus::Owned);
		assert_eq!(owned.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
	}
}
