use std::collections::BTreeSet;

use crate::types::Item;

/// Any-match: the item needs at least one of the selected tags.
/// An empty selection matches everything.
pub fn matches_tags(item: &Item, selected: &[String]) -> bool {
	if selected.is_empty() {
		return true;
	}
	selected.iter().any(|tag| item.has_tag(tag))
}

/// Every tag used by `items`, sorted and de-duplicated.
pub fn available_tags(items: &[Item]) -> Vec<String> {
	items
		.iter()
		.flat_map(|item| item.tags.iter().cloned())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}
