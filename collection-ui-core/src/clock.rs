use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for age buckets and retirement checks.
pub trait Clock {
	fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// A clock pinned to one instant, for tests and reproducible builds.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
	/// Midnight UTC on the given day. Panics on an invalid calendar date.
	pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
		let date = NaiveDate::from_ymd_opt(year, month, day)
			.unwrap_or_else(|| panic!("invalid date {year}-{month}-{day}"));
		Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
	}
}

impl Clock for FixedClock {
	fn now(&self) -> DateTime<Utc> {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Datelike;

	#[test]
	fn fixed_clock_is_midnight() {
		let clock = FixedClock::from_ymd(2024, 2, 29);
		let now = clock.now();
		assert_eq!((now.year(), now.month(), now.day()), (2024, 2, 29));
		assert_eq!(now.timestamp() % 86_400, 0);
	}
}
