//! Route edges and their wire form.
//!
//! A route is a JSON array of objects tagged by a `type` field. Decoding reads the tag first and
//! dispatches through [`EdgeKind`]; an unknown tag fails the whole route rather than being
//! skipped, because later edges assume earlier ones were traversed.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::EdgeDecodeError;
use crate::models::Coordinate;
use crate::pattern::Pattern;
use crate::session::{HeldItem, Interactor, SessionReader};

/// Outcome of a single [`EdgeAction::traverse`] attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// The action was issued. The edge is not necessarily satisfied yet.
    Issued,
    /// Nothing to act on right now (object or item not found, click rejected).
    Failed,
    /// The host cannot perform this kind of action.
    Unsupported,
}

impl Traversal {
    pub fn issued(self) -> bool { self == Traversal::Issued }

    fn from_click(ok: bool) -> Self {
        if ok { Traversal::Issued } else { Traversal::Failed }
    }
}

pub trait EdgeAction {
    /// True when the edge's effect already holds and it can be skipped.
    fn trivial<S: SessionReader + ?Sized>(&self, session: &S) -> bool {
        let _ = session;
        false
    }

    /// Attempt exactly one action towards satisfying the edge.
    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub position: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub id: i32,
    pub position: Coordinate,
    pub action: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectEdge {
    pub id: i32,
    pub position: Coordinate,
    pub action: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellTeleport {
    pub spell: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTeleport {
    pub item: Pattern,
    pub action: Pattern,
}

impl EdgeAction for Step {
    fn trivial<S: SessionReader + ?Sized>(&self, _session: &S) -> bool { true }

    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        Traversal::from_click(session.click_tile(self.position))
    }
}

impl EdgeAction for Door {
    /// Unobserved tiles count as "still closed".
    fn trivial<S: SessionReader + ?Sized>(&self, session: &S) -> bool {
        session.is_loaded(self.position)
            && !session.objects_on(self.position).iter().any(|o| o.id == self.id)
    }

    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        interact_with_object(session, self.id, self.position, &self.action)
    }
}

impl EdgeAction for GameObjectEdge {
    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        interact_with_object(session, self.id, self.position, &self.action)
    }
}

impl EdgeAction for SpellTeleport {
    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        session.cast_spell(&self.spell)
    }
}

impl EdgeAction for ItemTeleport {
    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        let found = session
            .inventory()
            .into_iter()
            .chain(session.equipment())
            .find_map(|item| matching_item_action(item, &self.item, &self.action));
        match found {
            Some((item, label)) => session.interact_item(&item, &label),
            None => {
                debug!(item=%self.item, action=%self.action, "no held item offers the teleport");
                Traversal::Failed
            }
        }
    }
}

fn matching_item_action(item: HeldItem, name: &Pattern, action: &Pattern) -> Option<(HeldItem, String)> {
    if !item.name.as_deref().is_some_and(|n| name.is_match(n)) {
        return None;
    }
    let label = item.actions.iter().find(|a| action.is_match(a))?.clone();
    Some((item, label))
}

fn interact_with_object<S: Interactor + ?Sized>(
    session: &mut S,
    id: i32,
    position: Coordinate,
    action: &Pattern,
) -> Traversal {
    let Some(object) = session.objects_on(position).into_iter().find(|o| o.id == id) else {
        debug!(id, %position, "object not on tile");
        return Traversal::Failed;
    };
    let Some(label) = object.actions.iter().find(|a| action.is_match(a)).cloned() else {
        debug!(id, %position, action=%action, actions=?object.actions, "no matching action");
        return Traversal::Failed;
    };
    session.interact_object(&object, &label)
}

/// Discriminator table. `GameObjectEdge` travels as `"GameObject"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Step,
    Door,
    GameObject,
    SpellTeleport,
    ItemTeleport,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 5] = [
        EdgeKind::Step,
        EdgeKind::Door,
        EdgeKind::GameObject,
        EdgeKind::SpellTeleport,
        EdgeKind::ItemTeleport,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EdgeKind::Step => "Step",
            EdgeKind::Door => "Door",
            EdgeKind::GameObject => "GameObject",
            EdgeKind::SpellTeleport => "SpellTeleport",
            EdgeKind::ItemTeleport => "ItemTeleport",
        }
    }

    /// Kinds whose effect shows up in [`EdgeAction::trivial`], so issuing the action is not
    /// enough to count them as passed.
    pub fn settles_by_observation(self) -> bool {
        matches!(self, EdgeKind::Step | EdgeKind::Door)
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    fn decode(self, fields: Value) -> Result<Edge, serde_json::Error> {
        match self {
            EdgeKind::Step => serde_json::from_value(fields).map(Edge::Step),
            EdgeKind::Door => serde_json::from_value(fields).map(Edge::Door),
            EdgeKind::GameObject => serde_json::from_value(fields).map(Edge::GameObject),
            EdgeKind::SpellTeleport => serde_json::from_value(fields).map(Edge::SpellTeleport),
            EdgeKind::ItemTeleport => serde_json::from_value(fields).map(Edge::ItemTeleport),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Edge {
    Step(Step),
    Door(Door),
    GameObject(GameObjectEdge),
    SpellTeleport(SpellTeleport),
    ItemTeleport(ItemTeleport),
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Step(_) => EdgeKind::Step,
            Edge::Door(_) => EdgeKind::Door,
            Edge::GameObject(_) => EdgeKind::GameObject,
            Edge::SpellTeleport(_) => EdgeKind::SpellTeleport,
            Edge::ItemTeleport(_) => EdgeKind::ItemTeleport,
        }
    }

    /// Tile the edge acts on, if it has one.
    pub fn position(&self) -> Option<Coordinate> {
        match self {
            Edge::Step(e) => Some(e.position),
            Edge::Door(e) => Some(e.position),
            Edge::GameObject(e) => Some(e.position),
            Edge::SpellTeleport(_) | Edge::ItemTeleport(_) => None,
        }
    }

    pub fn from_value(value: Value) -> Result<Self, EdgeDecodeError> {
        let Value::Object(mut fields) = value else {
            return Err(EdgeDecodeError::NotAnObject);
        };
        let tag = match fields.remove("type") {
            Some(Value::String(tag)) => tag,
            _ => return Err(EdgeDecodeError::MissingDiscriminator),
        };
        let kind = EdgeKind::from_tag(&tag).ok_or(EdgeDecodeError::UnknownKind(tag))?;
        kind.decode(Value::Object(fields))
            .map_err(|source| EdgeDecodeError::Malformed { kind: kind.tag(), source })
    }
}

/// Decode a whole route, keeping server order. Any bad element fails the route.
pub fn decode_route(value: Value) -> Result<Vec<Edge>, EdgeDecodeError> {
    let Value::Array(items) = value else {
        return Err(EdgeDecodeError::NotAnArray);
    };
    items.into_iter().map(Edge::from_value).collect()
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Edge::from_value(value).map_err(de::Error::custom)
    }
}

impl EdgeAction for Edge {
    fn trivial<S: SessionReader + ?Sized>(&self, session: &S) -> bool {
        match self {
            Edge::Step(e) => e.trivial(session),
            Edge::Door(e) => e.trivial(session),
            Edge::GameObject(e) => e.trivial(session),
            Edge::SpellTeleport(e) => e.trivial(session),
            Edge::ItemTeleport(e) => e.trivial(session),
        }
    }

    fn traverse<S: Interactor + ?Sized>(&self, session: &mut S) -> Traversal {
        match self {
            Edge::Step(e) => e.traverse(session),
            Edge::Door(e) => e.traverse(session),
            Edge::GameObject(e) => e.traverse(session),
            Edge::SpellTeleport(e) => e.traverse(session),
            Edge::ItemTeleport(e) => e.traverse(session),
        }
    }
}
