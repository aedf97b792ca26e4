use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSkill;

/// Skills as named on the wire (upper case, as the server's requirement data stores them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
}

impl Skill {
    pub const ALL: [Skill; 23] = [
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Hitpoints,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecrafting,
        Skill::Hunter,
        Skill::Construction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Skill::Attack => "ATTACK",
            Skill::Defence => "DEFENCE",
            Skill::Strength => "STRENGTH",
            Skill::Hitpoints => "HITPOINTS",
            Skill::Ranged => "RANGED",
            Skill::Prayer => "PRAYER",
            Skill::Magic => "MAGIC",
            Skill::Cooking => "COOKING",
            Skill::Woodcutting => "WOODCUTTING",
            Skill::Fletching => "FLETCHING",
            Skill::Fishing => "FISHING",
            Skill::Firemaking => "FIREMAKING",
            Skill::Crafting => "CRAFTING",
            Skill::Smithing => "SMITHING",
            Skill::Mining => "MINING",
            Skill::Herblore => "HERBLORE",
            Skill::Agility => "AGILITY",
            Skill::Thieving => "THIEVING",
            Skill::Slayer => "SLAYER",
            Skill::Farming => "FARMING",
            Skill::Runecrafting => "RUNECRAFTING",
            Skill::Hunter => "HUNTER",
            Skill::Construction => "CONSTRUCTION",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Skill {
    type Err = UnknownSkill;

    /// Exact wire name only; the server already upper-cases skill names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .into_iter()
            .find(|skill| skill.name() == s)
            .ok_or_else(|| UnknownSkill(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_serde_and_from_str() {
        for skill in Skill::ALL {
            let v = serde_json::to_value(skill).unwrap();
            assert_eq!(v, serde_json::Value::String(skill.name().to_string()));
            assert_eq!(skill.name().parse::<Skill>().unwrap(), skill);
        }
    }

    #[test]
    fn unknown_or_lower_case_names_are_rejected() {
        assert!("SAILING".parse::<Skill>().is_err());
        assert!("magic".parse::<Skill>().is_err());
    }
}
