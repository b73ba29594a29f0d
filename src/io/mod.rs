pub mod csv;

pub use self::csv::{
    CoordinateSource, CsvDigipinConfig, CsvSummary, CsvToDigipin, csv_to_digipin_csv,
    digipin_csv_to_coords_csv,
};
