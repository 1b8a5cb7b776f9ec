use chrono::Datelike;

use crate::clock::Clock;

/// A set is retired once its retirement year lies strictly in the past.
/// Sets retiring this year are still on sale.
pub fn is_retired(year_retired: Option<i32>, current_year: i32) -> bool {
	match year_retired {
		Some(year) => year < current_year,
		None => false,
	}
}

/// [`is_retired`] against the clock's calendar year.
pub fn is_retired_now(year_retired: Option<i32>, clock: &dyn Clock) -> bool {
	is_retired(year_retired, clock.now().year())
}
