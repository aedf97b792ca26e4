//! Seams to the host automation runtime.
//!
//! Edges and the state encoder never talk to a game client directly; they read through
//! [`SessionReader`] and act through [`Interactor`]. A host that lacks a capability keeps the
//! default method, which reports [`Traversal::Unsupported`].

use serde::{Deserialize, Serialize};

use crate::edge::Traversal;
use crate::models::Coordinate;
use crate::skill::Skill;

pub mod recorded;

pub use recorded::{Interaction, RecordedSession};

/// An inventory or equipment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    /// `None` when the item definition could not be loaded.
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i32,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// A game object standing on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: i32,
    pub position: Coordinate,
    #[serde(default)]
    pub actions: Vec<String>,
}

pub trait SessionReader {
    fn varp(&self, id: i32) -> i32;

    /// `None` when the varbit definition is unknown to the client.
    fn varbit(&self, id: i32) -> Option<i32>;

    fn inventory(&self) -> Vec<HeldItem>;

    fn equipment(&self) -> Vec<HeldItem>;

    /// Current (boosted) level. Negative when the skill does not apply to the account.
    fn skill_level(&self, skill: Skill) -> i32;

    /// Whether the tile is inside the loaded scene, i.e. its contents can be observed.
    fn is_loaded(&self, tile: Coordinate) -> bool;

    fn objects_on(&self, tile: Coordinate) -> Vec<SceneObject>;

    fn player_position(&self) -> Option<Coordinate>;
}

pub trait Interactor: SessionReader {
    /// Click the tile (minimap or scene), returns whether the click landed.
    fn click_tile(&mut self, tile: Coordinate) -> bool;

    fn interact_object(&mut self, object: &SceneObject, action: &str) -> Traversal {
        let _ = (object, action);
        Traversal::Unsupported
    }

    fn interact_item(&mut self, item: &HeldItem, action: &str) -> Traversal {
        let _ = (item, action);
        Traversal::Unsupported
    }

    fn cast_spell(&mut self, spell: &str) -> Traversal {
        let _ = spell;
        Traversal::Unsupported
    }
}
