use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, Time32SecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, Timelike};
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;

use crate::error::{PipelineError, Result};
use crate::models::{station, weather, Station, WeatherObservation};

const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(PipelineError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the deduplicated station table.
    pub fn write_stations(&self, records: &[Station], path: &Path) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = station_arrow_schema();
        let batch = stations_to_batch(records, schema.clone())?;
        self.write_batch(batch, schema, path)
    }

    /// Write the concatenated weather observation table.
    pub fn write_observations(&self, records: &[WeatherObservation], path: &Path) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = weather_arrow_schema();
        let batch = observations_to_batch(records, schema.clone())?;
        self.write_batch(batch, schema, path)
    }

    fn write_batch(&self, batch: RecordBatch, schema: Arc<Schema>, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(())
    }

    /// Row count and size of a written file, for reporting and tests.
    pub fn file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let total_rows = reader.metadata().file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            file_size,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub file_size: u64,
}

fn station_arrow_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(station::REGION, DataType::Utf8, false),
        Field::new(station::STATE, DataType::Utf8, false),
        Field::new(station::STATION_NAME, DataType::Utf8, false),
        Field::new(station::ID_STATION_WHO, DataType::Utf8, false),
        Field::new(station::LATITUDE, DataType::Float64, false),
        Field::new(station::LONGITUDE, DataType::Float64, false),
        Field::new(station::ALTITUDE, DataType::Float64, false),
        Field::new(station::FOUNDING_DATE, DataType::Date32, false),
    ]))
}

fn weather_arrow_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new(station::ID_STATION_WHO, DataType::Utf8, false),
        Field::new(weather::DATE, DataType::Date32, false),
        Field::new(
            weather::TIME,
            DataType::Time32(TimeUnit::Second),
            false,
        ),
    ];
    for name in MEASUREMENT_COLUMNS.iter().map(|(name, _)| *name) {
        fields.push(Field::new(name, DataType::Float64, true));
    }
    Arc::new(Schema::new(fields))
}

fn date32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date");
    date.signed_duration_since(epoch).num_days() as i32
}

fn stations_to_batch(records: &[Station], schema: Arc<Schema>) -> Result<RecordBatch> {
    let regions: Vec<&str> = records.iter().map(|r| r.region.as_str()).collect();
    let states: Vec<&str> = records.iter().map(|r| r.state.as_str()).collect();
    let names: Vec<&str> = records.iter().map(|r| r.station_name.as_str()).collect();
    let ids: Vec<&str> = records.iter().map(|r| r.id_station_who.as_str()).collect();
    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
    let altitudes: Vec<f64> = records.iter().map(|r| r.altitude).collect();
    let founding_dates: Vec<i32> = records.iter().map(|r| date32(r.founding_date)).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(regions)),
            Arc::new(StringArray::from(states)),
            Arc::new(StringArray::from(names)),
            Arc::new(StringArray::from(ids)),
            Arc::new(Float64Array::from(latitudes)),
            Arc::new(Float64Array::from(longitudes)),
            Arc::new(Float64Array::from(altitudes)),
            Arc::new(Date32Array::from(founding_dates)),
        ],
    )?;

    Ok(batch)
}

/// Measurement columns in output order, paired with their accessor.
const MEASUREMENT_COLUMNS: &[(&str, fn(&WeatherObservation) -> Option<f64>)] = &[
    (weather::TOTAL_PRECIPITATION, |r| r.total_precipitation),
    (weather::ATMOSPHERIC_PRESSURE, |r| r.atmospheric_pressure),
    (weather::MAX_ATMOSPHERIC_PRESSURE, |r| {
        r.max_atmospheric_pressure
    }),
    (weather::MIN_ATMOSPHERIC_PRESSURE, |r| {
        r.min_atmospheric_pressure
    }),
    (weather::GLOBAL_RADIATION, |r| r.global_radiation),
    (weather::DRY_BULB_TEMPERATURE, |r| r.dry_bulb_temperature),
    (weather::DEW_POINT_TEMPERATURE, |r| r.dew_point_temperature),
    (weather::MAX_TEMPERATURE, |r| r.max_temperature),
    (weather::MIN_TEMPERATURE, |r| r.min_temperature),
    (weather::MAX_DEW_POINT_TEMPERATURE, |r| {
        r.max_dew_point_temperature
    }),
    (weather::MIN_DEW_POINT_TEMPERATURE, |r| {
        r.min_dew_point_temperature
    }),
    (weather::MAX_RELATIVE_HUMIDITY, |r| r.max_relative_humidity),
    (weather::MIN_RELATIVE_HUMIDITY, |r| r.min_relative_humidity),
    (weather::RELATIVE_HUMIDITY, |r| r.relative_humidity),
    (weather::WIND_DIRECTION, |r| r.wind_direction),
    (weather::MAX_WIND_GUST, |r| r.max_wind_gust),
    (weather::WIND_SPEED, |r| r.wind_speed),
];

fn observations_to_batch(
    records: &[WeatherObservation],
    schema: Arc<Schema>,
) -> Result<RecordBatch> {
    let ids: Vec<&str> = records.iter().map(|r| r.id_station_who.as_str()).collect();
    let dates: Vec<i32> = records.iter().map(|r| date32(r.date)).collect();
    let times: Vec<i32> = records
        .iter()
        .map(|r| r.time.num_seconds_from_midnight() as i32)
        .collect();

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(Date32Array::from(dates)),
        Arc::new(Time32SecondArray::from(times)),
    ];

    for (_, accessor) in MEASUREMENT_COLUMNS {
        let values: Vec<Option<f64>> = records.iter().map(accessor).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}
