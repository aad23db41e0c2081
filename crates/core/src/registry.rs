use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One row of the ID registry (`id_table`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// Insertion counter assigned by the store; the highest value is "last".
    pub seq: i64,
    pub local_name: String,
    pub external_name: String,
    /// Identifier as stored. Rows written by other tools may hold text that
    /// is not an integer; see [`RegistryRecord::parsed_identifier`].
    pub identifier: String,
}

impl RegistryRecord {
    /// # Errors
    /// Returns [`CoreError::InvalidIdentifier`] when the stored value is not an integer.
    pub fn parsed_identifier(&self) -> Result<i64> {
        parse_identifier(&self.identifier)
    }
}

/// Parse a user-typed identifier. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`CoreError::InvalidIdentifier`] when the text is not an integer.
pub fn parse_identifier(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| CoreError::InvalidIdentifier(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integer() {
        assert_eq!(parse_identifier(" 42 "), Ok(42));
        assert_eq!(parse_identifier("-3"), Ok(-3));
    }

    #[test]
    fn rejects_non_integer() {
        assert_eq!(parse_identifier("1.5"), Err(CoreError::InvalidIdentifier("1.5".to_owned())));
        assert!(parse_identifier("").is_err());
        assert!(parse_identifier("abc").is_err());
    }

    #[test]
    fn stored_identifier_is_parsed_on_demand() {
        let mut record = RegistryRecord {
            seq: 1,
            local_name: "Taro".to_owned(),
            external_name: "Taro S".to_owned(),
            identifier: "7".to_owned(),
        };
        assert_eq!(record.parsed_identifier(), Ok(7));
        record.identifier = "abc".to_owned();
        assert!(record.parsed_identifier().is_err());
    }
}
