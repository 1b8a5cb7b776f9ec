// ---------------------------------------------------------------------------
// Fuzzy text search
// ---------------------------------------------------------------------------
//
// Weighted approximate matching over item name, tags, set number and notes.
// A field matches when the query is within an edit-distance tolerance of
// some window of the field text, wherever that window sits. Results come
// back most relevant first.
// ---------------------------------------------------------------------------

use crate::types::Item;

/// Queries shorter than this (in characters) skip the index entirely.
pub const MIN_QUERY_LEN: usize = 2;

/// Default looseness: 0 demands an exact window, 1 accepts anything.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

// ---------------------------------------------------------------------------
// Edit distance
// ---------------------------------------------------------------------------

/// Number of single-character edits turning `a` into `b`, counted over
/// chars rather than bytes.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
	let a_chars: Vec<char> = a.chars().collect();
	let b_chars: Vec<char> = b.chars().collect();
	levenshtein_chars(&a_chars, &b_chars)
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
	// `row` spans the shorter side.
	let (short, long) = if a.len() > b.len() { (b, a) } else { (a, b) };
	let mut row: Vec<usize> = (0..=short.len()).collect();

	for (j, &lc) in long.iter().enumerate() {
		let mut diagonal = row[0];
		row[0] = j + 1;
		for (i, &sc) in short.iter().enumerate() {
			let substitute = diagonal + usize::from(sc != lc);
			diagonal = row[i + 1];
			row[i + 1] = substitute.min(row[i] + 1).min(diagonal + 1);
		}
	}

	row[short.len()]
}

/// Edit distance scaled by the longer char count and flipped, so
/// `"set"` vs `"set"` is 1.0 and two unrelated words of equal length are 0.0.
/// Two empty strings count as identical.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
	let a_chars: Vec<char> = a.chars().collect();
	let b_chars: Vec<char> = b.chars().collect();
	similarity_chars(&a_chars, &b_chars)
}

fn similarity_chars(a: &[char], b: &[char]) -> f64 {
	let max_len = a.len().max(b.len());
	if max_len == 0 {
		return 1.0;
	}
	1.0 - levenshtein_chars(a, b) as f64 / max_len as f64
}

/// Best similarity of `query` against any window of `candidate`.
///
/// Both inputs are expected lowercased already. Windows of the query length
/// and one character either side are tried, so a single insertion or
/// deletion inside the match still scores well. Containment scores 1.
pub fn window_similarity(query: &str, candidate: &str) -> f64 {
	if query.is_empty() || candidate.is_empty() {
		return 0.0;
	}
	if candidate.contains(query) {
		return 1.0;
	}

	let q: Vec<char> = query.chars().collect();
	let c: Vec<char> = candidate.chars().collect();

	if q.len() >= c.len() {
		return similarity_chars(&q, &c);
	}

	let window_sizes = [q.len(), (q.len() + 1).min(c.len()), q.len().saturating_sub(1).max(1)];
	let mut best: f64 = 0.0;
	'outer: for &ws in &window_sizes {
		for start in 0..=c.len() - ws {
			let sim = similarity_chars(&q, &c[start..start + ws]);
			if sim > best {
				best = sim;
			}
			if best >= 1.0 {
				break 'outer;
			}
		}
	}
	best
}

// ---------------------------------------------------------------------------
// Search keys
// ---------------------------------------------------------------------------

/// Item fields covered by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
	Name,
	Tags,
	SetId,
	Notes,
}

impl SearchKey {
	pub const ALL: [SearchKey; 4] = [Self::Name, Self::Tags, Self::SetId, Self::Notes];

	pub fn default_weight(self) -> f64 {
		match self {
			Self::Name => 0.4,
			Self::Tags => 0.3,
			Self::SetId => 0.2,
			Self::Notes => 0.1,
		}
	}

	fn values(self, item: &Item) -> Vec<String> {
		match self {
			Self::Name => vec![item.name.to_lowercase()],
			Self::Tags => item.tags.iter().map(|t| t.to_lowercase()).collect(),
			Self::SetId => item.set_id.iter().map(|s| s.to_lowercase()).collect(),
			Self::Notes => item.notes.iter().map(|s| s.to_lowercase()).collect(),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyOptions {
	pub keys: Vec<(SearchKey, f64)>,
	pub threshold: f64,
}

impl Default for FuzzyOptions {
	fn default() -> Self {
		Self {
			keys: SearchKey::ALL
				.iter()
				.map(|k| (*k, k.default_weight()))
				.collect(),
			threshold: DEFAULT_THRESHOLD,
		}
	}
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// Pluggable text search over an item list.
///
/// `rebuild` is called whenever the engine receives a new item list;
/// `search` returns positions into that list, most relevant first.
pub trait SearchProvider {
	fn rebuild(&mut self, items: &[Item]);
	fn search(&self, query: &str) -> Vec<usize>;
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
	/// Position in the indexed list.
	pub index: usize,
	/// Weighted relevance in [0, 1].
	pub score: f64,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
	/// Lowercased field values, aligned with `FuzzyOptions::keys`.
	fields: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct FuzzyIndex {
	options: FuzzyOptions,
	entries: Vec<IndexedEntry>,
}

impl FuzzyIndex {
	pub fn new(options: FuzzyOptions) -> Self {
		Self {
			options,
			entries: Vec::new(),
		}
	}

	pub fn build(items: &[Item]) -> Self {
		let mut index = Self::default();
		index.rebuild(items);
		index
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Score every entry against `query` and return the hits, best first.
	/// Entries with equal scores keep their original order.
	pub fn search_scored(&self, query: &str) -> Vec<SearchHit> {
		let q = query.to_lowercase();
		if q.is_empty() {
			return Vec::new();
		}

		let min_similarity = 1.0 - self.options.threshold;
		let total_weight: f64 = self.options.keys.iter().map(|(_, w)| w).sum();
		if total_weight <= 0.0 {
			return Vec::new();
		}

		let mut hits: Vec<SearchHit> = self
			.entries
			.iter()
			.enumerate()
			.filter_map(|(index, entry)| {
				let mut weighted = 0.0;
				let mut matched = false;
				for ((_, weight), values) in self.options.keys.iter().zip(&entry.fields) {
					let best = values
						.iter()
						.map(|v| window_similarity(&q, v))
						.fold(0.0_f64, f64::max);
					if best >= min_similarity {
						matched = true;
						weighted += weight * best;
					}
				}
				matched.then(|| SearchHit {
					index,
					score: weighted / total_weight,
				})
			})
			.collect();

		hits.sort_by(|a, b| b.score.total_cmp(&a.score));
		hits
	}
}

impl SearchProvider for FuzzyIndex {
	fn rebuild(&mut self, items: &[Item]) {
		self.entries = items
			.iter()
			.map(|item| IndexedEntry {
				fields: self
					.options
					.keys
					.iter()
					.map(|(key, _)| key.values(item))
					.collect(),
			})
			.collect();
		tracing::debug!(entries = self.entries.len(), "rebuilt fuzzy index");
	}

	fn search(&self, query: &str) -> Vec<usize> {
		self.search_scored(query).into_iter().map(|h| h.index).collect()
	}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::ItemStatus;

	fn item(id: &str, name: &str, tags: &[&str]) -> Item {
		let mut item = Item::new(id, name, ItemStatus::Owned, "2024-01-01");
		item.tags = tags.iter().map(|t| t.to_string()).collect();
		item
	}

	// -- Levenshtein --

	#[test]
	fn levenshtein_kitten_sitting() {
		assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
	}

	#[test]
	fn levenshtein_empty() {
		assert_eq!(levenshtein_distance("", "hello"), 5);
		assert_eq!(levenshtein_distance("hello", ""), 5);
		assert_eq!(levenshtein_distance("", ""), 0);
	}

	#[test]
	fn levenshtein_similarity_known_values() {
		let sim = levenshtein_similarity("kitten", "sitting");
		assert!((sim - (1.0 - 3.0 / 7.0)).abs() < 1e-10);
	}

	#[test]
	fn levenshtein_counts_chars_not_bytes() {
		assert_eq!(levenshtein_distance("café", "cafe"), 1);
	}

	// -- window_similarity --

	#[test]
	fn window_containment_is_perfect() {
		assert_eq!(window_similarity("death", "death star"), 1.0);
		assert_eq!(window_similarity("star", "death star"), 1.0);
	}

	#[test]
	fn window_tolerates_typo() {
		let sim = window_similarity("deth", "death star");
		assert!(sim >= 0.6, "sim = {sim}");
	}

	#[test]
	fn window_rejects_unrelated() {
		let sim = window_similarity("death", "botanical");
		assert!(sim < 0.6, "sim = {sim}");
	}

	#[test]
	fn window_empty_inputs() {
		assert_eq!(window_similarity("", "abc"), 0.0);
		assert_eq!(window_similarity("abc", ""), 0.0);
	}

	// -- FuzzyIndex --

	#[test]
	fn search_finds_by_name_case_insensitive() {
		let items = vec![
			item("1", "Death Star", &["starwars"]),
			item("2", "Botanical Bonsai", &["plants"]),
		];
		let index = FuzzyIndex::build(&items);
		assert_eq!(index.search("DEATH"), vec![0]);
	}

	#[test]
	fn search_matches_tags() {
		let items = vec![
			item("1", "Death Star", &["starwars"]),
			item("2", "Orchid", &["plants"]),
		];
		let index = FuzzyIndex::build(&items);
		assert_eq!(index.search("plants"), vec![1]);
	}

	#[test]
	fn search_matches_set_id_and_notes() {
		let mut a = item("1", "Orchid", &[]);
		a.set_id = Some("10311".into());
		let mut b = item("2", "Bonsai", &[]);
		b.notes = Some("Gift from grandma".into());
		let items = vec![a, b];
		let index = FuzzyIndex::build(&items);
		assert_eq!(index.search("10311"), vec![0]);
		assert_eq!(index.search("grandma"), vec![1]);
	}

	#[test]
	fn name_hits_outrank_notes_hits() {
		let mut noted = item("1", "Orchid", &[]);
		noted.notes = Some("looks like a falcon".into());
		let named = item("2", "Millennium Falcon", &[]);
		let items = vec![noted, named];
		let index = FuzzyIndex::build(&items);
		assert_eq!(index.search("falcon"), vec![1, 0]);
	}

	#[test]
	fn equal_scores_keep_input_order() {
		let items = vec![
			item("1", "Castle", &[]),
			item("2", "Castle", &[]),
			item("3", "Castle", &[]),
		];
		let index = FuzzyIndex::build(&items);
		assert_eq!(index.search("castle"), vec![0, 1, 2]);
	}

	#[test]
	fn rebuild_replaces_entries() {
		let mut index = FuzzyIndex::build(&[item("1", "Castle", &[])]);
		assert_eq!(index.len(), 1);
		index.rebuild(&[]);
		assert!(index.is_empty());
		assert!(index.search("castle").is_empty());
	}

	#[test]
	fn zero_threshold_requires_exact_window() {
		let items = vec![item("1", "Death Star", &[])];
		let mut index = FuzzyIndex::new(FuzzyOptions {
			threshold: 0.0,
			..FuzzyOptions::default()
		});
		index.rebuild(&items);
		assert!(index.search("deth").is_empty());
		assert_eq!(index.search("death"), vec![0]);
	}
}
