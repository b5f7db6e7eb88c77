//! Report shapes served by the HTTP endpoints

use crate::error::SensordResult;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entries are sorted maps so report JSON is byte-stable across runs.
pub type Entry = BTreeMap<String, String>;

/// The classic monitoring API shape.
///
/// `Actions` and `Resources` are always present, as empty arrays, for
/// compatibility with consumers of the original report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassicReport {
    #[serde(rename = "Information")]
    pub information: Vec<Entry>,

    #[serde(rename = "Actions")]
    pub actions: Vec<Entry>,

    #[serde(rename = "Resources")]
    pub resources: Vec<Entry>,
}

impl ClassicReport {
    /// Build a report carrying only information entries.
    pub fn with_information(information: Vec<Entry>) -> Self {
        Self {
            information,
            actions: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Serialize to the wire payload.
    pub fn encode(&self) -> SensordResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_serialize_as_arrays() {
        let report = ClassicReport::with_information(vec![]);
        let encoded = report.encode().unwrap();
        let text = std::str::from_utf8(&encoded).unwrap();
        assert_eq!(
            text,
            r#"{"Information":[],"Actions":[],"Resources":[]}"#
        );
    }

    #[test]
    fn information_entries_round_trip() {
        let mut entry = Entry::new();
        entry.insert("name".to_string(), "tmp75-i2c-3-48".to_string());
        entry.insert("Adapter".to_string(), "ast_i2c.3".to_string());

        let report = ClassicReport::with_information(vec![entry]);
        let encoded = report.encode().unwrap();
        let decoded: ClassicReport = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, report);
        assert!(decoded.actions.is_empty());
    }
}
