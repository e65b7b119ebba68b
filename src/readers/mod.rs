pub mod station_reader;
pub mod weather_reader;

pub use station_reader::read_station_header;
pub use weather_reader::read_weather_file;
