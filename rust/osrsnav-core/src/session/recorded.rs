use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::edge::Traversal;
use crate::models::Coordinate;
use crate::session::{HeldItem, Interactor, SceneObject, SessionReader};
use crate::skill::Skill;

/// Something an [`Interactor`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    ClickTile(Coordinate),
    Object { id: i32, position: Coordinate, action: String },
    Item { name: Option<String>, action: String },
    Spell(String),
}

/// In-memory session loaded from a JSON fixture. Interactions are recorded, not performed,
/// except that a successful tile click moves the player there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedSession {
    pub position: Option<Coordinate>,
    pub varps: BTreeMap<i32, i32>,
    pub varbits: BTreeMap<i32, i32>,
    pub inventory: Vec<HeldItem>,
    pub equipment: Vec<HeldItem>,
    /// Missing skills read as -1.
    pub skills: BTreeMap<Skill, i32>,
    pub loaded: BTreeSet<Coordinate>,
    pub objects: Vec<SceneObject>,
    /// `None` means the host cannot cast spells at all.
    pub spells: Option<BTreeSet<String>>,
    #[serde(skip)]
    pub interactions: Vec<Interaction>,
}

impl RecordedSession {
    pub fn with_loaded(tile: Coordinate) -> Self {
        let mut s = Self::default();
        s.loaded.insert(tile);
        s
    }

    pub fn remove_objects(&mut self, id: i32, tile: Coordinate) {
        self.objects.retain(|o| !(o.id == id && o.position == tile));
    }
}

impl SessionReader for RecordedSession {
    fn varp(&self, id: i32) -> i32 { self.varps.get(&id).copied().unwrap_or(0) }

    fn varbit(&self, id: i32) -> Option<i32> { self.varbits.get(&id).copied() }

    fn inventory(&self) -> Vec<HeldItem> { self.inventory.clone() }

    fn equipment(&self) -> Vec<HeldItem> { self.equipment.clone() }

    fn skill_level(&self, skill: Skill) -> i32 { self.skills.get(&skill).copied().unwrap_or(-1) }

    fn is_loaded(&self, tile: Coordinate) -> bool { self.loaded.contains(&tile) }

    fn objects_on(&self, tile: Coordinate) -> Vec<SceneObject> {
        self.objects.iter().filter(|o| o.position == tile).cloned().collect()
    }

    fn player_position(&self) -> Option<Coordinate> { self.position }
}

impl Interactor for RecordedSession {
    fn click_tile(&mut self, tile: Coordinate) -> bool {
        if !self.is_loaded(tile) {
            return false;
        }
        self.interactions.push(Interaction::ClickTile(tile));
        self.position = Some(tile);
        true
    }

    fn interact_object(&mut self, object: &SceneObject, action: &str) -> Traversal {
        self.interactions.push(Interaction::Object {
            id: object.id,
            position: object.position,
            action: action.to_string(),
        });
        Traversal::Issued
    }

    fn interact_item(&mut self, item: &HeldItem, action: &str) -> Traversal {
        self.interactions.push(Interaction::Item { name: item.name.clone(), action: action.to_string() });
        Traversal::Issued
    }

    fn cast_spell(&mut self, spell: &str) -> Traversal {
        let Some(known) = &self.spells else { return Traversal::Unsupported };
        if !known.contains(spell) {
            return Traversal::Failed;
        }
        self.interactions.push(Interaction::Spell(spell.to_string()));
        Traversal::Issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_loads_with_defaults() {
        let s: RecordedSession = serde_json::from_value(json!({
            "position": {"x": 3164, "y": 3484, "plane": 0},
            "varps": {"281": 1000},
            "inventory": [{"name": "Coins", "quantity": 500}, {"quantity": 1}],
            "skills": {"MAGIC": 55}
        }))
        .unwrap();
        assert_eq!(s.varp(281), 1000);
        assert_eq!(s.varp(1), 0);
        assert_eq!(s.varbit(4070), None);
        assert_eq!(s.skill_level(Skill::Magic), 55);
        assert_eq!(s.skill_level(Skill::Agility), -1);
        assert_eq!(s.inventory()[1].name, None);
        assert!(s.spells.is_none());
    }

    #[test]
    fn click_moves_only_onto_loaded_tiles() {
        let here = Coordinate::new(3200, 3200, 0);
        let mut s = RecordedSession::with_loaded(here);
        assert!(!s.click_tile(Coordinate::new(3300, 3300, 0)));
        assert!(s.click_tile(here));
        assert_eq!(s.player_position(), Some(here));
        assert_eq!(s.interactions, vec![Interaction::ClickTile(here)]);
    }
}
