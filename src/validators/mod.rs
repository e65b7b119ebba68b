pub mod columns;
pub mod fields;
pub mod row;
pub mod schema;

pub use columns::check_column_consistency;
pub use row::{validate_station_row, validate_weather_row, RowRejection};
pub use schema::{station_schema, weather_schema};
