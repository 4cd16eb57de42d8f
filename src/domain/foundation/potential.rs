//! Potential enum - the closed registry of 9 scorable traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine traits every answer is scored against.
///
/// Declaration order is the registry order: it drives iteration, tie-breaks
/// in rankings and the key order of serialized score tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Potential {
    Amethyst,
    Sapphire,
    Heliodor,
    Garnet,
    Citrine,
    Emerald,
    Amber,
    Ruby,
    Shungit,
}

impl Potential {
    /// All potentials in registry order.
    pub const ALL: [Potential; 9] = [
        Potential::Amethyst,
        Potential::Sapphire,
        Potential::Heliodor,
        Potential::Garnet,
        Potential::Citrine,
        Potential::Emerald,
        Potential::Amber,
        Potential::Ruby,
        Potential::Shungit,
    ];

    /// Returns all potentials in registry order.
    pub fn all() -> &'static [Potential; 9] {
        &Self::ALL
    }

    /// Returns the 0-based registry position.
    pub fn order_index(&self) -> usize {
        *self as usize
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Potential::Amethyst => "Amethyst",
            Potential::Sapphire => "Sapphire",
            Potential::Heliodor => "Heliodor",
            Potential::Garnet => "Garnet",
            Potential::Citrine => "Citrine",
            Potential::Emerald => "Emerald",
            Potential::Amber => "Amber",
            Potential::Ruby => "Ruby",
            Potential::Shungit => "Shungit",
        }
    }

    /// Returns the human-readable meaning of the potential.
    pub fn description(&self) -> &'static str {
        match self {
            Potential::Amethyst => "Depth, analysis, strategy, thinking.",
            Potential::Sapphire => "Meaning, spirituality, mission, inner direction.",
            Potential::Heliodor => "Voice, communication, delivery, conversational charisma.",
            Potential::Garnet => "Stage, emotion, attention, beauty for others.",
            Potential::Citrine => "Results, money, deals, a business approach.",
            Potential::Emerald => "Beauty, aesthetics, care, atmosphere.",
            Potential::Amber => "Order, structure, health, detail.",
            Potential::Ruby => "Risk, drive, adventure, events.",
            Potential::Shungit => "Body, strength, endurance, physical grounding.",
        }
    }
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_nine_potentials() {
        assert_eq!(Potential::all().len(), 9);
    }

    #[test]
    fn order_index_matches_registry_position() {
        for (idx, p) in Potential::all().iter().enumerate() {
            assert_eq!(p.order_index(), idx);
        }
    }

    #[test]
    fn every_potential_has_a_description() {
        for p in Potential::all() {
            assert!(!p.description().is_empty(), "{} lacks a description", p);
        }
    }

    #[test]
    fn serializes_by_name() {
        assert_eq!(
            serde_json::to_string(&Potential::Shungit).unwrap(),
            "\"Shungit\""
        );
    }

    #[test]
    fn unknown_name_fails_to_deserialize() {
        assert!(serde_json::from_str::<Potential>("\"SHУNGIT\"").is_err());
    }
}
