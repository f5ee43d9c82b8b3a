//! Item kinds and catalog records

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The importable item tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Greater potion (carries an ingredient cost)
    GreaterPotion,
    /// Lesser potion
    LesserPotion,
    /// Magic item
    MagicItem,
    /// Magic weapon or armour (carries an effects description)
    MagicWeaponOrArmour,
}

impl ItemKind {
    /// Canonical tag accepted on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::GreaterPotion => "greaterpotion",
            ItemKind::LesserPotion => "lesserpotion",
            ItemKind::MagicItem => "magicitem",
            ItemKind::MagicWeaponOrArmour => "magicweaponorarmour",
        }
    }

    /// Human-readable name used in progress output
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::GreaterPotion => "GreaterPotion",
            ItemKind::LesserPotion => "LesserPotion",
            ItemKind::MagicItem => "MagicItem",
            ItemKind::MagicWeaponOrArmour => "MagicWeaponOrArmour",
        }
    }

    /// Backing table in the catalog store
    pub fn table(&self) -> &'static str {
        match self {
            ItemKind::GreaterPotion => "greater_potions",
            ItemKind::LesserPotion => "lesser_potions",
            ItemKind::MagicItem => "magic_items",
            ItemKind::MagicWeaponOrArmour => "magic_weapons_or_armour",
        }
    }

    /// Column holding the variant-specific field, if the kind has one
    pub fn variant_column(&self) -> Option<&'static str> {
        match self {
            ItemKind::GreaterPotion => Some("ingredient_cost"),
            ItemKind::MagicWeaponOrArmour => Some("effects"),
            ItemKind::LesserPotion | ItemKind::MagicItem => None,
        }
    }

    pub fn all() -> &'static [ItemKind] {
        &[
            ItemKind::GreaterPotion,
            ItemKind::LesserPotion,
            ItemKind::MagicItem,
            ItemKind::MagicWeaponOrArmour,
        ]
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greaterpotion" => Ok(ItemKind::GreaterPotion),
            "lesserpotion" => Ok(ItemKind::LesserPotion),
            "magicitem" => Ok(ItemKind::MagicItem),
            "magicweaponorarmour" => Ok(ItemKind::MagicWeaponOrArmour),
            _ => Err(UnknownItemKind(s.to_string())),
        }
    }
}

/// An item-type tag outside the closed set
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid item type '{0}' (valid: greaterpotion, lesserpotion, magicitem, magicweaponorarmour)")]
pub struct UnknownItemKind(pub String);

/// Fields that only exist on some item kinds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VariantFields {
    /// Lesser potions and magic items carry nothing extra
    #[default]
    Plain,
    GreaterPotion {
        ingredient_cost: Option<i64>,
    },
    MagicWeaponOrArmour {
        effects: Option<String>,
    },
}

impl VariantFields {
    pub fn ingredient_cost(&self) -> Option<i64> {
        match self {
            VariantFields::GreaterPotion { ingredient_cost } => *ingredient_cost,
            _ => None,
        }
    }

    pub fn effects(&self) -> Option<&str> {
        match self {
            VariantFields::MagicWeaponOrArmour { effects } => effects.as_deref(),
            _ => None,
        }
    }
}

/// Non-key values written on create or update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDefaults {
    pub name: String,
    pub purchase: Option<i64>,
    pub sale: Option<i64>,
    pub variant: VariantFields,
}

/// A stored item row
///
/// Serializes every column of the kind's table: the variant column is always
/// present (as `null` when empty) for the kinds that own one, and absent for
/// the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: i64,
    pub kind: ItemKind,
    pub name: String,
    pub purchase: Option<i64>,
    pub sale: Option<i64>,
    pub die_roll: Option<i64>,
    pub ingredient_cost: Option<i64>,
    pub effects: Option<String>,
}

impl Serialize for ItemRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 5 + usize::from(self.kind.variant_column().is_some());
        let mut state = serializer.serialize_struct("ItemRecord", len)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("purchase", &self.purchase)?;
        state.serialize_field("sale", &self.sale)?;
        state.serialize_field("die_roll", &self.die_roll)?;
        match self.kind {
            ItemKind::GreaterPotion => {
                state.serialize_field("ingredient_cost", &self.ingredient_cost)?
            }
            ItemKind::MagicWeaponOrArmour => state.serialize_field("effects", &self.effects)?,
            ItemKind::LesserPotion | ItemKind::MagicItem => {}
        }
        state.end()
    }
}

impl ItemRecord {
    /// Name shown in listings and progress lines
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            match self.die_roll {
                Some(roll) => format!("Item with Die Roll {}", roll),
                None => format!("Item #{}", self.id),
            }
        } else {
            self.name.clone()
        }
    }
}

/// A row of the treasure table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreasureRecord {
    pub id: i64,
    pub die_roll: Option<i64>,
    pub gold: Option<i64>,
    pub multiply_gold_by_d20: bool,
    pub result: Option<String>,
}

/// A row of the random spell table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomSpellRecord {
    pub id: i64,
    pub die_roll: Option<i64>,
    pub second_die_1_to_5: Option<String>,
    pub second_die_6_to_10: Option<String>,
    pub second_die_11_to_15: Option<String>,
    pub second_die_16_to_20: Option<String>,
}
