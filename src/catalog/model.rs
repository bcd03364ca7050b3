//! Record types for the opening catalog document.
//!
//! Field names mirror the JSON shape consumed by renderers (`name`, `eco`,
//! `moves`, `description`). Nothing here validates content; `validate` owns
//! the load-time checks and `OpeningCatalog` is the only way to obtain a
//! checked set of records.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// JSON text of the bundled catalog, embedded at compile time.
pub const BUNDLED_CATALOG_JSON: &str = include_str!("../../catalogs/openings_v1.json");

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Encyclopaedia of Chess Openings code such as `C60`.
pub struct EcoCode(pub String);

impl EcoCode {
    /// Parse a code, requiring one letter `A`..`E` followed by two digits.
    pub fn parse(raw: &str) -> Result<Self> {
        if !is_well_formed_eco(raw) {
            bail!("eco '{raw}' must be a letter A-E followed by two digits");
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ECO volume named by the leading letter, if the code is well formed.
    pub fn volume(&self) -> Option<EcoVolume> {
        if !is_well_formed_eco(&self.0) {
            return None;
        }
        self.0.chars().next().and_then(EcoVolume::from_letter)
    }
}

impl Borrow<str> for EcoCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn is_well_formed_eco(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 3
        && matches!(bytes[0], b'A'..=b'E')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EcoVolume {
    A,
    B,
    C,
    D,
    E,
}

impl EcoVolume {
    pub const ALL: [EcoVolume; 5] = [
        EcoVolume::A,
        EcoVolume::B,
        EcoVolume::C,
        EcoVolume::D,
        EcoVolume::E,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(EcoVolume::A),
            'B' => Some(EcoVolume::B),
            'C' => Some(EcoVolume::C),
            'D' => Some(EcoVolume::D),
            'E' => Some(EcoVolume::E),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            EcoVolume::A => 'A',
            EcoVolume::B => 'B',
            EcoVolume::C => 'C',
            EcoVolume::D => 'D',
            EcoVolume::E => 'E',
        }
    }

    /// Conventional title of the ECO volume.
    pub fn title(&self) -> &'static str {
        match self {
            EcoVolume::A => "Flank openings",
            EcoVolume::B => "Semi-open games",
            EcoVolume::C => "Open games and the French Defense",
            EcoVolume::D => "Closed and semi-closed games",
            EcoVolume::E => "Indian defenses",
        }
    }
}

impl TryFrom<&str> for EcoVolume {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => match EcoVolume::from_letter(letter.to_ascii_uppercase()) {
                Some(volume) => Ok(volume),
                None => bail!("unknown ECO volume '{value}'; expected one of A, B, C, D, E"),
            },
            _ => bail!("unknown ECO volume '{value}'; expected one of A, B, C, D, E"),
        }
    }
}

impl fmt::Display for EcoVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// One named opening line.
pub struct OpeningRecord {
    pub name: String,
    pub eco: EcoCode,
    /// Moves in ply order, starting with White's first move.
    pub moves: Vec<String>,
    pub description: String,
}

impl OpeningRecord {
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Side to move once the whole line has been played.
    pub fn side_to_move(&self) -> Side {
        if self.moves.len() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Numbered move text, e.g. `1. e4 e5 2. Nf3 Nc6 3. Bb5`.
    pub fn move_text(&self) -> String {
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(idx, pair)| match pair {
                [white, black] => format!("{}. {} {}", idx + 1, white, black),
                [white] => format!("{}. {}", idx + 1, white),
                _ => String::new(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when `line` is a prefix of (or equal to) this record's moves.
    pub fn continues<S: AsRef<str>>(&self, line: &[S]) -> bool {
        line.len() <= self.moves.len()
            && self
                .moves
                .iter()
                .zip(line)
                .all(|(mv, played)| mv == played.as_ref())
    }

    /// True when this record's moves are a prefix of (or equal to) `line`.
    pub fn is_reached_by<S: AsRef<str>>(&self, line: &[S]) -> bool {
        self.moves.len() <= line.len()
            && self
                .moves
                .iter()
                .zip(line)
                .all(|(mv, played)| mv == played.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
/// Serializable view of a whole catalog document.
pub struct CatalogDocument<'a> {
    pub schema_version: &'a str,
    pub catalog: &'a CatalogMetadata,
    pub openings: &'a [OpeningRecord],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(moves: &[&str]) -> OpeningRecord {
        OpeningRecord {
            name: "Ruy Lopez".to_string(),
            eco: EcoCode("C60".to_string()),
            moves: moves.iter().map(|mv| mv.to_string()).collect(),
            description: "classic".to_string(),
        }
    }

    #[test]
    fn move_text_numbers_full_moves() {
        let ruy = record(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(ruy.move_text(), "1. e4 e5 2. Nf3 Nc6 3. Bb5");
        assert_eq!(record(&[]).move_text(), "");
        assert_eq!(record(&["c4"]).move_text(), "1. c4");
    }

    #[test]
    fn side_to_move_alternates_by_ply() {
        assert_eq!(record(&[]).side_to_move(), Side::White);
        assert_eq!(record(&["e4"]).side_to_move(), Side::Black);
        assert_eq!(record(&["e4", "c5"]).side_to_move(), Side::White);
    }

    #[test]
    fn continues_and_reached_by_compare_prefixes() {
        let ruy = record(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert!(ruy.continues(&["e4", "e5"]));
        assert!(ruy.continues::<&str>(&[]));
        assert!(!ruy.continues(&["d4"]));
        assert!(ruy.is_reached_by(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]));
        assert!(!ruy.is_reached_by(&["e4", "e5", "Nf3"]));
    }

    #[test]
    fn eco_parse_enforces_letter_and_digits() {
        assert_eq!(EcoCode::parse("B20").unwrap().volume(), Some(EcoVolume::B));
        for bad in ["Z99", "c60", "C6", "C600", "", "C6x"] {
            assert!(EcoCode::parse(bad).is_err(), "{bad} should be rejected");
        }
        assert_eq!(EcoCode("Z99".to_string()).volume(), None);
    }

    #[test]
    fn volume_parses_single_letters() {
        assert_eq!(EcoVolume::try_from("c").unwrap(), EcoVolume::C);
        assert_eq!(EcoVolume::try_from(" E ").unwrap(), EcoVolume::E);
        assert!(EcoVolume::try_from("F").is_err());
        assert!(EcoVolume::try_from("AB").is_err());
    }

    #[test]
    fn record_uses_external_field_names() {
        let value = serde_json::to_value(record(&["e4", "c5"])).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Ruy Lopez",
                "eco": "C60",
                "moves": ["e4", "c5"],
                "description": "classic"
            })
        );
        let extra = json!({
            "name": "x", "eco": "A00", "moves": [], "description": "y", "fen": "..."
        });
        assert!(serde_json::from_value::<OpeningRecord>(extra).is_err());
    }
}
