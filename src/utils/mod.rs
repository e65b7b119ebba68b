pub mod progress;
pub mod years;

pub use progress::ProgressReporter;
pub use years::{available_years, filter_requested_years, year_window, FIRST_YEAR_WITH_DATA};
