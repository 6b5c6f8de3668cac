//! Catalog level records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sudokuzen_core::{Board, ParseBoardError};

/// One catalog entry in its camelCase wire form.
///
/// Scoring fields are optional: imported or freshly dug levels carry only
/// identity and puzzle data until the filter or audit pass backfills them.
/// Unknown fields survive a parse/render round trip through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    /// Stable numeric id.
    #[serde(default)]
    pub id: u64,
    /// Star tier the entry is published under.
    #[serde(default)]
    pub stars: u8,
    /// Difficulty label, e.g. `NIRVANA 寂滅`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub difficulty_name: String,
    /// Display name shown to players.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    /// 81 row-major cell values, 0 for empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub puzzle: Vec<u8>,
    /// The solved grid, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<u8>>,
    /// Whether the logic solver finishes this puzzle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_solvable: Option<bool>,
    /// Difficulty score from the solve trace (999 = solver failure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_score: Option<u32>,
    /// Wire name of the heaviest technique in the trace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_technique: Option<String>,
    /// Fraction of placements made by singles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_ratio: Option<f64>,
    /// Editorial technique-tier label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_tier: Option<String>,
    /// Opaque editorial tag for the advanced proxy tiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_tag: Option<String>,
    /// Any fields this toolkit does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LevelRecord {
    /// Decodes the puzzle field into a [`Board`].
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error if the puzzle array is missing
    /// cells or holds out-of-range values.
    pub fn board(&self) -> Result<Board, ParseBoardError> {
        Board::from_slice(&self.puzzle)
    }

    /// Returns the number of filled cells in the puzzle array.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.puzzle.iter().filter(|&&v| v != 0).count()
    }

    /// Returns the 81-character fingerprint of the puzzle array.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.puzzle.iter().map(|v| char::from(b'0' + v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "stars": 5,
            "difficultyName": "NIRVANA",
            "displayName": "NIRVANA-07",
            "puzzle": vec![0; 81],
            "clueColor": "#aabbcc"
        })
    }

    #[test]
    fn test_camel_case_round_trip() {
        let record: LevelRecord = serde_json::from_value(minimal_json()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.display_name, "NIRVANA-07");
        // Unknown field is preserved.
        assert_eq!(record.extra["clueColor"], "#aabbcc");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["difficultyName"], "NIRVANA");
        assert_eq!(back["clueColor"], "#aabbcc");
        assert!(back.get("difficultyScore").is_none());
    }

    #[test]
    fn test_fingerprint_and_clues() {
        let mut record: LevelRecord = serde_json::from_value(minimal_json()).unwrap();
        record.puzzle[0] = 9;
        record.puzzle[80] = 1;
        assert_eq!(record.clue_count(), 2);
        let fp = record.fingerprint();
        assert!(fp.starts_with('9'));
        assert!(fp.ends_with('1'));
        assert_eq!(fp.len(), 81);
    }

    #[test]
    fn test_board_rejects_bad_puzzle() {
        let mut record: LevelRecord = serde_json::from_value(minimal_json()).unwrap();
        record.puzzle.truncate(10);
        assert!(record.board().is_err());
    }
}
