use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::error::{PipelineError, Result};

/// INMET's automatic station network started publishing in 2000.
pub const FIRST_YEAR_WITH_DATA: i32 = 2000;

/// The inclusive year window with data available at `today`.
///
/// The current year is only complete once the previous month has closed,
/// so the upper bound comes from stepping back past the start of the
/// current month.
pub fn year_window(today: NaiveDate) -> (i32, i32) {
    let before_current_month = today - Duration::days(today.day() as i64 + 1);
    (FIRST_YEAR_WITH_DATA, before_current_month.year())
}

/// Keep the requested years that fall inside the available window,
/// reporting the ones dropped. Errors if nothing valid remains.
pub fn filter_requested_years(years: &[i32], today: NaiveDate) -> Result<Vec<i32>> {
    let (first, last) = year_window(today);

    let (valid, removed): (Vec<i32>, Vec<i32>) = years
        .iter()
        .copied()
        .partition(|year| (first..=last).contains(year));

    if !removed.is_empty() {
        println!("The years {:?} were removed from the list.", removed);
    }

    if valid.is_empty() {
        return Err(PipelineError::InvalidYears { first, last });
    }

    Ok(valid)
}

/// The year window as of the wall clock.
pub fn available_years() -> (i32, i32) {
    year_window(Local::now().date_naive())
}
