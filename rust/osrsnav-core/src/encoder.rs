use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::{DataSelection, GameState};
use crate::session::{HeldItem, SessionReader};
use crate::skill::Skill;

/// Name reported for held items whose definition is unavailable.
pub const UNKNOWN_ITEM_NAME: &str = "null";

/// Capture the session state a path request should carry.
///
/// With a selection only the requested identifiers are read. Without one, varps and varbits are
/// left empty while every held item and every applicable skill is reported.
pub fn snapshot<S: SessionReader + ?Sized>(session: &S, selection: Option<&DataSelection>) -> GameState {
    let state = match selection {
        Some(sel) => GameState {
            varps: sel.varps.iter().map(|&id| (id, session.varp(id))).collect(),
            varbits: sel
                .varbits
                .iter()
                .filter_map(|&id| session.varbit(id).map(|v| (id, v)))
                .collect(),
            items: held_items(session, |item| item.name.as_deref().is_some_and(|n| sel.wants_item(n))),
            skills: selected_skills(session, sel),
        },
        None => GameState {
            varps: BTreeMap::new(),
            varbits: BTreeMap::new(),
            items: held_items(session, |_| true),
            skills: Skill::ALL
                .into_iter()
                .map(|skill| (skill, session.skill_level(skill)))
                .filter(|&(_, level)| level >= 0)
                .map(|(skill, level)| (skill.name().to_string(), level))
                .collect(),
        },
    };
    debug!(
        selected = selection.is_some(),
        varps = state.varps.len(),
        varbits = state.varbits.len(),
        items = state.items.len(),
        skills = state.skills.len(),
        "game state captured"
    );
    state
}

// Inventory first, then equipment; a repeated name keeps the later quantity.
fn held_items<S, F>(session: &S, keep: F) -> BTreeMap<String, i32>
where
    S: SessionReader + ?Sized,
    F: Fn(&HeldItem) -> bool,
{
    let mut items = BTreeMap::new();
    for item in session.inventory().into_iter().chain(session.equipment()) {
        if !keep(&item) {
            continue;
        }
        let name = item.name.unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string());
        items.insert(name, item.quantity);
    }
    items
}

fn selected_skills<S: SessionReader + ?Sized>(session: &S, sel: &DataSelection) -> BTreeMap<String, i32> {
    let mut skills = BTreeMap::new();
    for name in &sel.skills {
        match name.parse::<Skill>() {
            Ok(skill) => {
                skills.insert(name.clone(), session.skill_level(skill));
            }
            Err(e) => warn!(error=%e, "selection names a skill this client does not know"),
        }
    }
    skills
}
