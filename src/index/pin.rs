use crate::error::DigipinError;
use crate::index::constants::{CODE_LENGTH, SEPARATOR, SEPARATOR_POSITIONS, symbol_position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated 10-symbol DIGIPIN.
///
/// Renders as `XXX-XXX-XXXX` and parses with or without separators.
///
/// # Example
///
/// ```
/// use digipin_rs::Digipin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let pin: Digipin = "39J438TJC7".parse()?;
/// assert_eq!(pin.to_string(), "39J-438-TJC7");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digipin([u8; CODE_LENGTH]);

impl Digipin {
    pub(crate) fn from_symbols(symbols: [u8; CODE_LENGTH]) -> Self {
        Self(symbols)
    }

    /// Parses a code, ignoring `-` separators wherever they appear.
    ///
    /// Fails with `InvalidLength` unless exactly 10 characters remain, then
    /// with `InvalidSymbol` on the first character outside the grid.
    pub fn parse(code: &str) -> Result<Self, DigipinError> {
        let count = code.chars().filter(|&c| c != SEPARATOR).count();
        if count != CODE_LENGTH {
            return Err(DigipinError::InvalidLength(count));
        }

        let mut symbols = [0u8; CODE_LENGTH];
        for (slot, c) in symbols
            .iter_mut()
            .zip(code.chars().filter(|&c| c != SEPARATOR))
        {
            symbol_position(c).ok_or(DigipinError::InvalidSymbol(c))?;
            *slot = c as u8;
        }

        Ok(Self(symbols))
    }

    /// The bare 10-symbol form, without separators.
    pub fn symbols(&self) -> &str {
        // Only grid bytes are ever stored, all of them ASCII
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Iterates the `(row, col)` grid position of each symbol, coarsest first.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .filter_map(|&s| symbol_position(s as char))
    }
}

impl fmt::Display for Digipin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &s) in self.0.iter().enumerate() {
            if SEPARATOR_POSITIONS.contains(&i) {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", s as char)?;
        }
        Ok(())
    }
}

impl FromStr for Digipin {
    type Err = DigipinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digipin {
    type Error = DigipinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Digipin> for String {
    fn from(pin: Digipin) -> Self {
        pin.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::DISPLAY_LENGTH;

    #[test]
    fn test_parse_with_and_without_separators() -> Result<(), DigipinError> {
        let dashed = Digipin::parse("39J-438-TJC7")?;
        let bare = Digipin::parse("39J438TJC7")?;
        let odd = Digipin::parse("-39-J4-38TJ-C7-")?;

        assert_eq!(dashed, bare);
        assert_eq!(dashed, odd);
        assert_eq!(bare.symbols(), "39J438TJC7");
        Ok(())
    }

    #[test]
    fn test_display_inserts_separators() -> Result<(), DigipinError> {
        let pin: Digipin = "39J438TJC7".parse()?;
        let rendered = pin.to_string();

        assert_eq!(rendered, "39J-438-TJC7");
        assert_eq!(rendered.len(), DISPLAY_LENGTH);
        assert_eq!(rendered.chars().nth(3), Some('-'));
        assert_eq!(rendered.chars().nth(7), Some('-'));
        Ok(())
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(Digipin::parse("ABC"), Err(DigipinError::InvalidLength(3)));
        assert_eq!(Digipin::parse(""), Err(DigipinError::InvalidLength(0)));
        assert_eq!(
            Digipin::parse("39J-438-TJC7F"),
            Err(DigipinError::InvalidLength(11))
        );
    }

    #[test]
    fn test_length_checked_before_symbols() {
        assert_eq!(Digipin::parse("ZZZ"), Err(DigipinError::InvalidLength(3)));
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            Digipin::parse("39J-438-TJCZ"),
            Err(DigipinError::InvalidSymbol('Z'))
        );
        assert_eq!(
            Digipin::parse("39j438TJC7"),
            Err(DigipinError::InvalidSymbol('j'))
        );
        assert_eq!(
            Digipin::parse("39J 438TJC"),
            Err(DigipinError::InvalidSymbol(' '))
        );
    }

    #[test]
    fn test_multibyte_character_counts_once() {
        assert_eq!(
            Digipin::parse("39J438TJCé"),
            Err(DigipinError::InvalidSymbol('é'))
        );
    }

    #[test]
    fn test_positions() -> Result<(), DigipinError> {
        let pin = Digipin::parse("FFF-FFF-FFF8")?;
        let positions: Vec<_> = pin.positions().collect();

        assert_eq!(positions.len(), CODE_LENGTH);
        assert!(positions[..9].iter().all(|&p| p == (0, 0)));
        assert_eq!(positions[9], (0, 3));
        Ok(())
    }

    #[test]
    fn test_serde_uses_display_form() -> Result<(), DigipinError> {
        let pin = Digipin::parse("39J438TJC7")?;
        let json = serde_json::to_string(&pin)
            .map_err(|e| DigipinError::SerializationError(e.to_string()))?;
        assert_eq!(json, "\"39J-438-TJC7\"");

        let back: Digipin = serde_json::from_str(&json)
            .map_err(|e| DigipinError::SerializationError(e.to_string()))?;
        assert_eq!(back, pin);

        let bad: Result<Digipin, _> = serde_json::from_str("\"39J-438-TJCZ\"");
        assert!(bad.is_err());
        Ok(())
    }
}
