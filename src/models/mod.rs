pub mod raw;
pub mod station;
pub mod weather;

pub use raw::{RawRow, RawTable};
pub use station::Station;
pub use weather::WeatherObservation;
