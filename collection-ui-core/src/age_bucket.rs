// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------
//
// An item's age is the number of whole days elapsed since `dateAdded`,
// floored. A bucket with a threshold matches ages up to and including it;
// the single open bucket (threshold `None`) matches ages beyond the largest
// finite threshold.
// ---------------------------------------------------------------------------

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::AgeBucket;
use crate::types::Item;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parse a content date. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp (read as UTC) and a plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.with_timezone(&Utc));
	}
	for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
		if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
			return Some(naive.and_utc());
		}
	}
	NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Whole days between `date_added` and `now`, floored. `None` when the
/// date does not parse.
pub fn days_since(date_added: &str, now: DateTime<Utc>) -> Option<i64> {
	let added = parse_date(date_added)?;
	let elapsed = now.signed_duration_since(added).num_milliseconds();
	Some(elapsed.div_euclid(MS_PER_DAY))
}

/// Largest finite threshold, i.e. where the open bucket begins.
fn open_bucket_cutoff(buckets: &[AgeBucket]) -> Option<u32> {
	buckets.iter().filter_map(|b| b.days).max()
}

/// No selection, or a label not in `buckets`, matches everything.
///
/// When the open bucket is selected but no bucket has a finite threshold
/// the filter is treated as inactive. An item whose `dateAdded` cannot be
/// parsed never matches an active bucket.
pub fn matches_age_bucket(
	item: &Item,
	selected: Option<&str>,
	buckets: &[AgeBucket],
	now: DateTime<Utc>,
) -> bool {
	let Some(label) = selected else {
		return true;
	};
	let Some(bucket) = buckets.iter().find(|b| b.label == label) else {
		return true;
	};

	let open_cutoff = match bucket.days {
		Some(_) => None,
		None => match open_bucket_cutoff(buckets) {
			Some(cutoff) => Some(cutoff),
			None => return true,
		},
	};

	let Some(age) = days_since(&item.date_added, now) else {
		return false;
	};

	match (bucket.days, open_cutoff) {
		(Some(days), _) => age <= i64::from(days),
		(None, Some(cutoff)) => age > i64::from(cutoff),
		(None, None) => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::{Clock, FixedClock};
	use crate::config::FiltersConfig;
	use crate::types::ItemStatus;
	use chrono::Duration;

	fn now() -> DateTime<Utc> {
		FixedClock::from_ymd(2025, 6, 15).now()
	}

	fn added(date: &str) -> Item {
		Item::new("1", "Set", ItemStatus::Owned, date)
	}

	fn added_ago(duration: Duration) -> Item {
		added(&(now() - duration).to_rfc3339())
	}

	// -- parse_date --

	#[test]
	fn parse_plain_date() {
		let dt = parse_date("2025-06-14").unwrap();
		assert_eq!(dt, now() - Duration::days(1));
	}

	#[test]
	fn parse_rfc3339_with_offset() {
		let dt = parse_date("2025-06-15T02:00:00+02:00").unwrap();
		assert_eq!(dt, now());
	}

	#[test]
	fn parse_naive_timestamp() {
		assert!(parse_date("2025-06-14T10:30:00").is_some());
		assert!(parse_date("2025-06-14T10:30:00.250").is_some());
	}

	#[test]
	fn parse_rejects_garbage() {
		assert!(parse_date("last tuesday").is_none());
		assert!(parse_date("").is_none());
	}

	// -- days_since --

	#[test]
	fn partial_day_floors_to_zero() {
		let item = added_ago(Duration::hours(23) + Duration::minutes(54));
		assert_eq!(days_since(&item.date_added, now()), Some(0));
	}

	#[test]
	fn whole_days() {
		assert_eq!(days_since("2025-06-05", now()), Some(10));
	}

	#[test]
	fn future_date_is_negative() {
		assert_eq!(days_since("2025-06-16", now()), Some(-1));
	}

	// -- matches_age_bucket --

	#[test]
	fn threshold_is_inclusive() {
		let buckets = FiltersConfig::default().age_buckets;
		let item = added("2025-06-08");
		assert!(matches_age_bucket(&item, Some("This week"), &buckets, now()));
		let item = added("2025-06-07");
		assert!(!matches_age_bucket(&item, Some("This week"), &buckets, now()));
	}

	#[test]
	fn open_bucket_beyond_largest_threshold() {
		let buckets = FiltersConfig::default().age_buckets;
		let year_ago = added_ago(Duration::days(365));
		let older = added_ago(Duration::days(366));
		assert!(!matches_age_bucket(&year_ago, Some("Older"), &buckets, now()));
		assert!(matches_age_bucket(&older, Some("Older"), &buckets, now()));
	}

	#[test]
	fn no_selection_matches() {
		let buckets = FiltersConfig::default().age_buckets;
		assert!(matches_age_bucket(&added("1999-01-01"), None, &buckets, now()));
	}

	#[test]
	fn unknown_label_matches() {
		let buckets = FiltersConfig::default().age_buckets;
		assert!(matches_age_bucket(&added("1999-01-01"), Some("Yesterday"), &buckets, now()));
	}

	#[test]
	fn open_bucket_without_thresholds_matches() {
		let buckets = vec![AgeBucket::new("Any", None)];
		assert!(matches_age_bucket(&added("2025-06-15"), Some("Any"), &buckets, now()));
	}

	#[test]
	fn unparseable_date_never_matches_active_bucket() {
		let buckets = FiltersConfig::default().age_buckets;
		let item = added("sometime");
		assert!(!matches_age_bucket(&item, Some("This week"), &buckets, now()));
		assert!(!matches_age_bucket(&item, Some("Older"), &buckets, now()));
		assert!(matches_age_bucket(&item, None, &buckets, now()));
	}
}
