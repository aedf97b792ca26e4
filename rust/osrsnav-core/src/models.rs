use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCoordinate;
use crate::pattern::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self { Self { x, y, plane } }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// Parses `x,y,plane`; surrounding whitespace and parentheses are tolerated.
impl FromStr for Coordinate {
    type Err = InvalidCoordinate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || InvalidCoordinate(s.to_string());
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = inner.split(',').map(|p| p.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(plane)), None) => Ok(Self { x, y, plane }),
            _ => Err(bad()),
        }
    }
}

/// Session state identifiers the server wants reported with path requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSelection {
    #[serde(default)]
    pub varps: BTreeSet<i32>,
    #[serde(default)]
    pub varbits: BTreeSet<i32>,
    #[serde(default)]
    pub items: Vec<Pattern>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl DataSelection {
    pub fn wants_item(&self, name: &str) -> bool {
        self.items.iter().any(|p| p.is_match(name))
    }
}

/// Point-in-time capture of session state, see [`crate::encoder::snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub varps: BTreeMap<i32, i32>,
    pub varbits: BTreeMap<i32, i32>,
    pub items: BTreeMap<String, i32>,
    pub skills: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGenerationRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    pub game_state: GameState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_snake_case_and_string_map_keys() {
        let mut state = GameState::default();
        state.varps.insert(281, 1000);
        state.items.insert("Coins".into(), 25);
        state.skills.insert("MAGIC".into(), 55);
        let req = PathGenerationRequest {
            start: Coordinate::new(3164, 3484, 0),
            end: Coordinate::new(3222, 3218, 0),
            game_state: state,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["start"], json!({"x": 3164, "y": 3484, "plane": 0}));
        assert_eq!(v["game_state"]["varps"], json!({"281": 1000}));
        assert_eq!(v["game_state"]["varbits"], json!({}));
        assert_eq!(v["game_state"]["items"]["Coins"], json!(25));
        assert_eq!(v["game_state"]["skills"]["MAGIC"], json!(55));
    }

    #[test]
    fn selection_decodes_from_server_shape() {
        let v = json!({
            "varps": [281, 29],
            "varbits": [4070],
            "items": ["Coins", "Law rune"],
            "skills": ["AGILITY"]
        });
        let sel: DataSelection = serde_json::from_value(v).unwrap();
        assert!(sel.varps.contains(&281) && sel.varps.contains(&29));
        assert!(sel.wants_item("Law rune"));
        assert!(!sel.wants_item("Air rune"));
        assert!(sel.skills.contains("AGILITY"));
    }

    #[test]
    fn coordinate_parses_with_or_without_parens() {
        assert_eq!("3164,3484,0".parse::<Coordinate>().unwrap(), Coordinate::new(3164, 3484, 0));
        assert_eq!("(3164, 3484, 1)".parse::<Coordinate>().unwrap(), Coordinate::new(3164, 3484, 1));
        assert!("3164,3484".parse::<Coordinate>().is_err());
        assert!("3164,3484,0,1".parse::<Coordinate>().is_err());
        assert!("a,b,c".parse::<Coordinate>().is_err());
        assert_eq!(Coordinate::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }
}
