/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DigipinError {
    /// The latitude or longitude lies outside the DIGIPIN domain.
    OutOfRange { latitude: f64, longitude: f64 },
    /// The code does not hold exactly 10 symbols once separators are removed.
    InvalidLength(usize),
    /// The code contains a character that is not part of the symbol grid.
    InvalidSymbol(char),
    /// File I/O error.
    IoError(String),
    /// CSV parsing or writing error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// JSON serialization or deserialization failed.
    SerializationError(String),
    /// The reference encoder could not answer a request.
    ReferenceError(String),
}

impl std::fmt::Display for DigipinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigipinError::OutOfRange {
                latitude,
                longitude,
            } => write!(
                f,
                "Coordinate out of range: ({}, {}) is outside lat [2.5, 38.5], lon [63.5, 99.5]",
                latitude, longitude
            ),
            DigipinError::InvalidLength(n) => {
                write!(f, "Invalid DIGIPIN length: expected 10 symbols, got {}", n)
            }
            DigipinError::InvalidSymbol(c) => write!(f, "Invalid character in DIGIPIN: '{}'", c),
            DigipinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigipinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigipinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            DigipinError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            DigipinError::ReferenceError(msg) => write!(f, "Reference encoder error: {}", msg),
        }
    }
}

impl std::error::Error for DigipinError {}
