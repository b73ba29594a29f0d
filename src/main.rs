use clap::{Parser, Subcommand, ValueEnum};
use digipin_rs::reference::{ReferenceTable, validate_against};
use digipin_rs::{
    CsvDigipinConfig, DigipinCell, DigipinError, GeometryFormat, csv_to_digipin_csv,
    digipin_csv_to_coords_csv,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "digipin")]
#[command(version, about = "Encode and decode DIGIPIN grid codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a latitude/longitude into a DIGIPIN
    Encode {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Print JSON instead of the bare code
        #[arg(long)]
        json: bool,
    },
    /// Decode a DIGIPIN into the center of its cell
    Decode {
        code: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the outline of a DIGIPIN cell
    Cell {
        code: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Geojson)]
        format: OutputFormat,
    },
    /// Add a DIGIPIN column to a CSV of coordinates or geometries
    CsvEncode {
        input: PathBuf,
        output: PathBuf,
        /// Latitude column, requires --lon
        #[arg(long, requires = "lon", conflicts_with = "geometry")]
        lat: Option<String>,
        /// Longitude column, requires --lat
        #[arg(long, requires = "lat")]
        lon: Option<String>,
        /// WKT or GeoJSON geometry column
        #[arg(long, default_value = "geometry")]
        geometry: String,
        /// Columns to leave out of the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Also write each cell outline
        #[arg(long, value_enum)]
        with_geometry: Option<OutputFormat>,
        /// Skip rows that cannot be encoded instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Add latitude/longitude columns to a CSV of DIGIPINs
    CsvDecode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "digipin")]
        column: String,
    },
    /// Compare local encodes with recorded reference answers (JSON array)
    Validate { table: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Wkt,
    Geojson,
}

impl From<OutputFormat> for GeometryFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Wkt => GeometryFormat::Wkt,
            OutputFormat::Geojson => GeometryFormat::GeoJson,
        }
    }
}

#[derive(Serialize)]
struct CellOutput<'a> {
    digipin: String,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<&'a str>,
}

impl<'a> CellOutput<'a> {
    fn new(cell: &DigipinCell, input: Option<&'a str>) -> Self {
        Self {
            digipin: cell.pin.to_string(),
            latitude: cell.latitude(),
            longitude: cell.longitude(),
            input,
        }
    }
}

fn error_message(e: &DigipinError) -> String {
    format!("Error: {e}")
}

fn to_json<T: Serialize>(value: &T) -> Result<String, DigipinError> {
    serde_json::to_string(value).map_err(|e| DigipinError::SerializationError(e.to_string()))
}

fn run(cli: Cli) -> Result<ExitCode, DigipinError> {
    match cli.command {
        Command::Encode {
            latitude,
            longitude,
            json,
        } => {
            let cell = DigipinCell::from_lat_lon(latitude, longitude)?;
            if json {
                println!("{}", to_json(&CellOutput::new(&cell, None))?);
            } else {
                println!("{}", cell.pin);
            }
        }
        Command::Decode { code, json } => {
            let cell = DigipinCell::from_code(&code)?;
            if json {
                println!("{}", to_json(&CellOutput::new(&cell, Some(&code)))?);
            } else {
                println!("{:.6},{:.6}", cell.latitude(), cell.longitude());
            }
        }
        Command::Cell { code, format } => {
            let cell = DigipinCell::from_code(&code)?;
            match format {
                OutputFormat::Wkt => {
                    println!("{}", GeometryFormat::Wkt.write_polygon(&cell.to_polygon()))
                }
                OutputFormat::Geojson => println!("{}", to_json(&cell.to_geojson_feature())?),
            }
        }
        Command::CsvEncode {
            input,
            output,
            lat,
            lon,
            geometry,
            exclude,
            with_geometry,
            skip_invalid,
        } => {
            let mut config = match (lat, lon) {
                (Some(lat), Some(lon)) => CsvDigipinConfig::from_coords(lat, lon),
                _ => CsvDigipinConfig::new(geometry),
            }
            .exclude(exclude)
            .skip_invalid(skip_invalid);
            if let Some(format) = with_geometry {
                config = config.with_cell_geometry(format.into());
            }

            let summary = csv_to_digipin_csv(&input, &output, &config)?;
            info!(
                output = %output.display(),
                written = summary.rows_written,
                skipped = summary.rows_skipped,
                "done"
            );
        }
        Command::CsvDecode {
            input,
            output,
            column,
        } => {
            let summary = digipin_csv_to_coords_csv(&input, &output, &column)?;
            info!(output = %output.display(), written = summary.rows_written, "done");
        }
        Command::Validate { table } => {
            let reference = ReferenceTable::from_json_file(&table)?;
            let report = validate_against(&reference, &reference.coordinates())?;

            println!(
                "checked {}, matched {}, mismatched {}",
                report.checked,
                report.matched,
                report.mismatches.len()
            );
            for mismatch in &report.mismatches {
                println!(
                    "  {} ours {} reference {}",
                    mismatch.coordinate, mismatch.ours, mismatch.reference
                );
            }
            if !report.all_matched() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_json_reports_cell_center() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_lat_lon(28.6139, 77.2090)?;
        let json = to_json(&CellOutput::new(&cell, None))?;

        assert_eq!(
            json,
            r#"{"digipin":"39J-438-TJC7","latitude":28.613901,"longitude":77.208998}"#
        );
        Ok(())
    }

    #[test]
    fn test_error_message_uses_display() {
        assert_eq!(
            error_message(&DigipinError::InvalidSymbol('Z')),
            "Error: Invalid character in DIGIPIN: 'Z'"
        );
    }
}
