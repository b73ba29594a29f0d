use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::geom::{GeometryFormat, parse_geometry_in_domain};
use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry (lon/lat axis order)
    GeometryColumn(String),
    /// Separate latitude and longitude columns in decimal degrees
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// Configuration for CSV to DIGIPIN conversion.
#[derive(Debug, Clone)]
pub struct CsvDigipinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvDigipinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::GeometryColumn(geometry_column.into()))
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{CsvDigipinConfig, GeometryFormat};
    ///
    /// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
    ///     .with_cell_geometry(GeometryFormat::Wkt)
    ///     .skip_invalid(true);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CoordinateColumns {
            lat_column: lat_column.into(),
            lon_column: lon_column.into(),
        })
    }

    fn with_source(source: CoordinateSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Log and drop rows that cannot be encoded instead of failing the run.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

pub trait CsvToDigipin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigipin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

/// Row counts of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

fn column_index(headers: &StringRecord, name: &str, role: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(DigipinError::CsvError(format!(
            "{} column name cannot be empty",
            role
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn field<'r>(record: &'r StringRecord, idx: usize, role: &str) -> Result<&'r str, DigipinError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", role, idx)))
}

fn parse_degrees(value: &str, role: &str) -> Result<f64, DigipinError> {
    value
        .parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", role, value)))
}

fn record_cells(
    record: &StringRecord,
    source: &SourceIndices,
) -> Result<Vec<DigipinCell>, DigipinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geometry = parse_geometry_in_domain(field(record, *idx, "geometry")?)?;
            DigipinCell::from_geometry(&geometry)
        }
        SourceIndices::Coordinates { lat_idx, lon_idx } => {
            let lat = parse_degrees(field(record, *lat_idx, "latitude")?, "latitude")?;
            let lon = parse_degrees(field(record, *lon_idx, "longitude")?, "longitude")?;
            Ok(vec![DigipinCell::from_lat_lon(lat, lon)?])
        }
    }
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with DIGIPINs.
///
/// Output columns are `digipin`, optionally `digipin_geometry`, then every
/// input column except the source and excluded columns. Rows are streamed.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigipinConfig};
///
/// let config = CsvDigipinConfig::from_coords("lat", "lon");
/// let summary = csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// println!("{} rows written", summary.rows_written);
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigipinConfig,
) -> Result<CsvSummary, DigipinError> {
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file =
        File::create(output_path.as_ref()).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin"];
    if config.include_cell_geometry.is_some() {
        header_row.push("digipin_geometry");
    }
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, h)| h),
    );
    writer
        .write_record(&header_row)
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();

    for result in reader.records() {
        let record = result.map_err(|e| DigipinError::CsvError(e.to_string()))?;
        summary.rows_read += 1;

        let cells = match record_cells(&record, &source_indices) {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid => {
                warn!(row = summary.rows_read, error = %e, "skipping row");
                summary.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.pin.to_string()];

            if let Some(format) = config.include_cell_geometry {
                row.push(format.write_polygon(&cell.to_polygon()));
            }

            row.extend(
                record
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !exclude_indices.contains(i))
                    .map(|(_, f)| f.to_string()),
            );
            writer
                .write_record(&row)
                .map_err(|e| DigipinError::CsvError(e.to_string()))?;
            summary.rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))?;

    info!(
        input = %csv_path.display(),
        read = summary.rows_read,
        written = summary.rows_written,
        skipped = summary.rows_skipped,
        "encoded CSV"
    );
    Ok(summary)
}

/// Decodes a column of DIGIPINs, appending `latitude` and `longitude` of
/// each cell center after the original columns.
///
/// An invalid code fails the whole run.
pub fn digipin_csv_to_coords_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    code_column: &str,
) -> Result<CsvSummary, DigipinError> {
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?
        .clone();
    let code_idx = column_index(&headers, code_column, "DIGIPIN")?;

    let out_file =
        File::create(output_path.as_ref()).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = headers.iter().collect();
    header_row.extend(["latitude", "longitude"]);
    writer
        .write_record(&header_row)
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();

    for result in reader.records() {
        let record = result.map_err(|e| DigipinError::CsvError(e.to_string()))?;
        summary.rows_read += 1;

        let code = field(&record, code_idx, "DIGIPIN")?;
        let cell = DigipinCell::from_code(code)?;
        debug!(code, center = %cell.center, "decoded");

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.push(cell.latitude().to_string());
        row.push(cell.longitude().to_string());
        writer
            .write_record(&row)
            .map_err(|e| DigipinError::CsvError(e.to_string()))?;
        summary.rows_written += 1;
    }

    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))?;

    info!(
        input = %csv_path.display(),
        rows = summary.rows_written,
        "decoded CSV"
    );
    Ok(summary)
}
