pub mod quarantine;
pub mod transformer;

pub use quarantine::QuarantineLog;
pub use transformer::{transform_stations, transform_weather, TransformReport};
