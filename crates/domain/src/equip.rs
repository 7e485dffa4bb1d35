//! Equip relationship rules.
//!
//! The character/weapon link is bidirectional: a character's `equipped` and
//! a weapon's `equipped_on` must always point at each other or both be empty.
//! This module holds the pure part of the equip transaction: which values
//! each side must have before the change and which values it gets after.
//! Applying both sides atomically is the engine's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{Character, Weapon};
use crate::error::DomainError;
use crate::value_objects::EquipSlot;
use crate::{CharacterId, WeaponId};

/// Which way an equip request moves the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipDirection {
    Equip,
    Unequip,
}

impl fmt::Display for EquipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equip => f.write_str("equip"),
            Self::Unequip => f.write_str("unequip"),
        }
    }
}

impl FromStr for EquipDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equip" => Ok(Self::Equip),
            // "remove" is the legacy route name for unequip
            "unequip" | "remove" => Ok(Self::Unequip),
            other => Err(DomainError::parse(format!(
                "Unsupported equip direction: {other:?}"
            ))),
        }
    }
}

/// Required prior value and replacement value for one side of the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTransition<T> {
    pub expected: EquipSlot<T>,
    pub new: EquipSlot<T>,
}

/// Both halves of an equip or unequip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipPlan {
    pub direction: EquipDirection,
    pub character_id: CharacterId,
    pub weapon_id: WeaponId,
    /// Transition of the character's `equipped` field.
    pub character: SlotTransition<WeaponId>,
    /// Transition of the weapon's `equipped_on` field.
    pub weapon: SlotTransition<CharacterId>,
}

impl EquipPlan {
    /// Compute the guarded transition for a request.
    ///
    /// - Equip: both slots must be empty; they end up pointing at each other.
    /// - Unequip: both slots must point at each other; they end up empty.
    pub fn for_request(
        direction: EquipDirection,
        character_id: CharacterId,
        weapon_id: WeaponId,
    ) -> Self {
        let linked_character = EquipSlot::Holding(weapon_id.clone());
        let linked_weapon = EquipSlot::Holding(character_id.clone());

        let (character, weapon) = match direction {
            EquipDirection::Equip => (
                SlotTransition {
                    expected: EquipSlot::Empty,
                    new: linked_character,
                },
                SlotTransition {
                    expected: EquipSlot::Empty,
                    new: linked_weapon,
                },
            ),
            EquipDirection::Unequip => (
                SlotTransition {
                    expected: linked_character,
                    new: EquipSlot::Empty,
                },
                SlotTransition {
                    expected: linked_weapon,
                    new: EquipSlot::Empty,
                },
            ),
        };

        Self {
            direction,
            character_id,
            weapon_id,
            character,
            weapon,
        }
    }

    /// Whether the given current state satisfies both guards.
    pub fn admits(&self, character: &Character, weapon: &Weapon) -> bool {
        character.equipped() == &self.character.expected
            && weapon.equipped_on() == &self.weapon.expected
    }
}

/// Relationship between one specific character and one specific weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Both slots are empty.
    Unlinked,
    /// The two slots point at each other.
    Linked,
    /// At least one slot points somewhere else.
    Elsewhere,
}

impl LinkState {
    pub fn between(character: &Character, weapon: &Weapon) -> Self {
        let c = character.equipped();
        let w = weapon.equipped_on();
        if c.is_empty() && w.is_empty() {
            Self::Unlinked
        } else if c.holds(weapon.id()) && w.holds(character.id()) {
            Self::Linked
        } else {
            Self::Elsewhere
        }
    }
}

/// A broken half-link found by [`find_link_violations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    /// The character points at a weapon that does not point back.
    CharacterDangling {
        character_id: CharacterId,
        weapon_id: WeaponId,
    },
    /// The weapon points at a character that does not point back.
    WeaponDangling {
        weapon_id: WeaponId,
        character_id: CharacterId,
    },
}

/// Check the bidirectional link invariant over one player's entities.
pub fn find_link_violations(characters: &[Character], weapons: &[Weapon]) -> Vec<LinkViolation> {
    let mut violations = Vec::new();

    for character in characters {
        if let Some(weapon_id) = character.equipped().holding() {
            let points_back = weapons
                .iter()
                .find(|w| w.id() == weapon_id)
                .is_some_and(|w| w.equipped_on().holds(character.id()));
            if !points_back {
                violations.push(LinkViolation::CharacterDangling {
                    character_id: character.id().clone(),
                    weapon_id: weapon_id.clone(),
                });
            }
        }
    }

    for weapon in weapons {
        if let Some(character_id) = weapon.equipped_on().holding() {
            let points_back = characters
                .iter()
                .find(|c| c.id() == character_id)
                .is_some_and(|c| c.equipped().holds(weapon.id()));
            if !points_back {
                violations.push(LinkViolation::WeaponDangling {
                    weapon_id: weapon.id().clone(),
                    character_id: character_id.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharacterDataId, CharacterName, PlayerId, WeaponDataId, WeaponName};
    use chrono::Utc;

    fn cid(s: &str) -> CharacterId {
        CharacterId::new(s).unwrap()
    }

    fn wid(s: &str) -> WeaponId {
        WeaponId::new(s).unwrap()
    }

    fn character(id: &str, equipped: EquipSlot<WeaponId>) -> Character {
        Character::from_parts(
            PlayerId::new("p1").unwrap(),
            cid(id),
            CharacterDataId::new("hero").unwrap(),
            CharacterName::default(),
            equipped,
            Utc::now(),
        )
    }

    fn weapon(id: &str, equipped_on: EquipSlot<CharacterId>) -> Weapon {
        Weapon::from_parts(
            PlayerId::new("p1").unwrap(),
            wid(id),
            WeaponDataId::new("sword").unwrap(),
            WeaponName::default(),
            equipped_on,
            Utc::now(),
        )
    }

    #[test]
    fn direction_parses_known_values() {
        assert_eq!("equip".parse::<EquipDirection>().unwrap(), EquipDirection::Equip);
        assert_eq!("Unequip".parse::<EquipDirection>().unwrap(), EquipDirection::Unequip);
        assert_eq!("remove".parse::<EquipDirection>().unwrap(), EquipDirection::Unequip);
        assert!("swap".parse::<EquipDirection>().is_err());
    }

    #[test]
    fn equip_plan_requires_empty_slots() {
        let plan = EquipPlan::for_request(EquipDirection::Equip, cid("c1"), wid("w1"));
        assert_eq!(plan.character.expected, EquipSlot::Empty);
        assert_eq!(plan.character.new, EquipSlot::Holding(wid("w1")));
        assert_eq!(plan.weapon.expected, EquipSlot::Empty);
        assert_eq!(plan.weapon.new, EquipSlot::Holding(cid("c1")));
    }

    #[test]
    fn unequip_plan_requires_mutual_links() {
        let plan = EquipPlan::for_request(EquipDirection::Unequip, cid("c1"), wid("w1"));
        assert_eq!(plan.character.expected, EquipSlot::Holding(wid("w1")));
        assert_eq!(plan.character.new, EquipSlot::Empty);
        assert_eq!(plan.weapon.expected, EquipSlot::Holding(cid("c1")));
        assert_eq!(plan.weapon.new, EquipSlot::Empty);
    }

    #[test]
    fn plan_admits_only_matching_state() {
        let equip = EquipPlan::for_request(EquipDirection::Equip, cid("c1"), wid("w1"));
        assert!(equip.admits(
            &character("c1", EquipSlot::Empty),
            &weapon("w1", EquipSlot::Empty)
        ));
        // Character already holding another weapon
        assert!(!equip.admits(
            &character("c1", EquipSlot::Holding(wid("w2"))),
            &weapon("w1", EquipSlot::Empty)
        ));
        // Weapon already on another character
        assert!(!equip.admits(
            &character("c1", EquipSlot::Empty),
            &weapon("w1", EquipSlot::Holding(cid("c2")))
        ));

        let unequip = EquipPlan::for_request(EquipDirection::Unequip, cid("c1"), wid("w1"));
        assert!(unequip.admits(
            &character("c1", EquipSlot::Holding(wid("w1"))),
            &weapon("w1", EquipSlot::Holding(cid("c1")))
        ));
        assert!(!unequip.admits(
            &character("c1", EquipSlot::Empty),
            &weapon("w1", EquipSlot::Empty)
        ));
    }

    #[test]
    fn link_state_classifies_pairs() {
        assert_eq!(
            LinkState::between(&character("c1", EquipSlot::Empty), &weapon("w1", EquipSlot::Empty)),
            LinkState::Unlinked
        );
        assert_eq!(
            LinkState::between(
                &character("c1", EquipSlot::Holding(wid("w1"))),
                &weapon("w1", EquipSlot::Holding(cid("c1")))
            ),
            LinkState::Linked
        );
        assert_eq!(
            LinkState::between(
                &character("c1", EquipSlot::Empty),
                &weapon("w1", EquipSlot::Holding(cid("c2")))
            ),
            LinkState::Elsewhere
        );
    }

    #[test]
    fn violations_detect_dangling_links() {
        let characters = vec![
            character("c1", EquipSlot::Holding(wid("w1"))),
            character("c2", EquipSlot::Holding(wid("w2"))),
        ];
        let weapons = vec![
            weapon("w1", EquipSlot::Holding(cid("c1"))),
            weapon("w2", EquipSlot::Empty),
            weapon("w3", EquipSlot::Holding(cid("c9"))),
        ];

        let violations = find_link_violations(&characters, &weapons);
        assert_eq!(
            violations,
            vec![
                LinkViolation::CharacterDangling {
                    character_id: cid("c2"),
                    weapon_id: wid("w2"),
                },
                LinkViolation::WeaponDangling {
                    weapon_id: wid("w3"),
                    character_id: cid("c9"),
                },
            ]
        );
    }

    #[test]
    fn consistent_inventory_has_no_violations() {
        let characters = vec![
            character("c1", EquipSlot::Holding(wid("w1"))),
            character("c2", EquipSlot::Empty),
        ];
        let weapons = vec![
            weapon("w1", EquipSlot::Holding(cid("c1"))),
            weapon("w2", EquipSlot::Empty),
        ];
        assert!(find_link_violations(&characters, &weapons).is_empty());
    }
}
