//! Cross-checking encodes against a reference DIGIPIN encoder.
//!
//! The reference is usually the India Post HTTP service, which answers
//! `POST /api/digipin/encode` with `{"digipin": "..."}`. Transport is left to
//! the caller: anything implementing [`ReferenceEncoder`] can be validated
//! against, including a closure or a [`ReferenceTable`] of recorded answers.

use crate::coord::LatLng;
use crate::error::DigipinError;
use crate::index::{Digipin, encode};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Path of the reference service's encode endpoint.
pub const ENCODE_ENDPOINT: &str = "/api/digipin/encode";

/// Request body sent to the reference encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LatLng> for EncodeRequest {
    fn from(coord: LatLng) -> Self {
        Self {
            latitude: coord.latitude,
            longitude: coord.longitude,
        }
    }
}

/// Response body returned by the reference encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub digipin: String,
}

pub trait ReferenceEncoder {
    fn reference_encode(&self, request: &EncodeRequest) -> Result<EncodeResponse, DigipinError>;
}

impl<F> ReferenceEncoder for F
where
    F: Fn(&EncodeRequest) -> Result<EncodeResponse, DigipinError>,
{
    fn reference_encode(&self, request: &EncodeRequest) -> Result<EncodeResponse, DigipinError> {
        self(request)
    }
}

/// One recorded reference answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub latitude: f64,
    pub longitude: f64,
    pub digipin: String,
}

/// Reference answers recorded ahead of time, matched by exact coordinate.
///
/// Entries keep their recorded order. A later entry for a coordinate already
/// in the table is dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    pub fn new(entries: impl IntoIterator<Item = ReferenceEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            match table.find(entry.latitude, entry.longitude) {
                Some(kept) => warn!(
                    latitude = entry.latitude,
                    longitude = entry.longitude,
                    kept = %kept.digipin,
                    dropped = %entry.digipin,
                    "duplicate reference entry"
                ),
                None => table.entries.push(entry),
            }
        }
        table
    }

    /// Loads a JSON array of `{"latitude", "longitude", "digipin"}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, DigipinError> {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(json)
            .map_err(|e| DigipinError::SerializationError(e.to_string()))?;
        Ok(Self::new(entries))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DigipinError> {
        let file = File::open(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        let entries: Vec<ReferenceEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DigipinError::SerializationError(e.to_string()))?;
        Ok(Self::new(entries))
    }

    fn find(&self, latitude: f64, longitude: f64) -> Option<&ReferenceEntry> {
        self.entries.iter().find(|e| {
            e.latitude.to_bits() == latitude.to_bits()
                && e.longitude.to_bits() == longitude.to_bits()
        })
    }

    /// Recorded coordinates, in recorded order.
    pub fn coordinates(&self) -> Vec<LatLng> {
        self.entries
            .iter()
            .map(|e| LatLng::new(e.latitude, e.longitude))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceEncoder for ReferenceTable {
    fn reference_encode(&self, request: &EncodeRequest) -> Result<EncodeResponse, DigipinError> {
        self.find(request.latitude, request.longitude)
            .map(|entry| EncodeResponse {
                digipin: entry.digipin.clone(),
            })
            .ok_or_else(|| {
                DigipinError::ReferenceError(format!(
                    "no recorded answer for ({}, {})",
                    request.latitude, request.longitude
                ))
            })
    }
}

/// A coordinate where the two encoders disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub coordinate: LatLng,
    pub ours: Digipin,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub checked: usize,
    pub matched: usize,
    pub mismatches: Vec<Mismatch>,
    /// Coordinates the reference could not answer, with the reason.
    pub unavailable: Vec<(LatLng, String)>,
}

impl ValidationReport {
    /// True when every answered coordinate matched and at least one was answered.
    pub fn all_matched(&self) -> bool {
        self.matched > 0 && self.mismatches.is_empty()
    }
}

/// Encodes every coordinate locally and compares it with the reference.
///
/// Reference failures are recorded as unavailable and validation carries on.
/// A coordinate we cannot encode ourselves aborts with that error.
///
/// # Example
/// ```
/// use digipin_rs::reference::{EncodeRequest, EncodeResponse, validate_against};
/// use digipin_rs::{DigipinError, LatLng};
///
/// # fn main() -> Result<(), DigipinError> {
/// let reference = |_: &EncodeRequest| -> Result<EncodeResponse, DigipinError> {
///     Ok(EncodeResponse { digipin: "39J-438-TJC7".to_string() })
/// };
/// let report = validate_against(&reference, &[LatLng::new(28.6139, 77.2090)])?;
/// assert!(report.all_matched());
/// # Ok(())
/// # }
/// ```
pub fn validate_against<R: ReferenceEncoder>(
    reference: &R,
    coords: &[LatLng],
) -> Result<ValidationReport, DigipinError> {
    let mut report = ValidationReport::default();

    for &coord in coords {
        let ours = encode(coord.latitude, coord.longitude)?;
        report.checked += 1;

        let theirs = match reference.reference_encode(&EncodeRequest::from(coord)) {
            Ok(response) => response.digipin,
            Err(e) => {
                warn!(coordinate = %coord, error = %e, "reference unavailable");
                report.unavailable.push((coord, e.to_string()));
                continue;
            }
        };

        if ours.to_string() == theirs {
            debug!(coordinate = %coord, digipin = %ours, "match");
            report.matched += 1;
        } else {
            warn!(coordinate = %coord, ours = %ours, reference = %theirs, "mismatch");
            report.mismatches.push(Mismatch {
                coordinate: coord,
                ours,
                reference: theirs,
            });
        }
    }

    Ok(report)
}
