//! Per-variant field mapping

use crate::core::item::{ItemDefaults, ItemKind, VariantFields};

use super::coerce::parse_optional_int;
use super::reader::ImportRow;
use super::ImportError;

/// Resolve a caller-supplied item-type tag
pub fn resolve_kind(tag: &str) -> Result<ItemKind, ImportError> {
    tag.parse::<ItemKind>()
        .map_err(|e| ImportError::Configuration(e.0))
}

/// Lookup key plus the values written on create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub die_roll: i64,
    pub defaults: ItemDefaults,
}

/// Build the upsert payload for a row whose die roll already coerced
///
/// Variant columns are only read for the kind that owns them: an
/// `ingredient_cost` cell in a lesser-potion file is ignored.
pub fn map_row(kind: ItemKind, die_roll: i64, row: &ImportRow) -> MappedRow {
    let variant = match kind {
        ItemKind::GreaterPotion => VariantFields::GreaterPotion {
            ingredient_cost: parse_optional_int(row.get("ingredient_cost")),
        },
        ItemKind::MagicWeaponOrArmour => VariantFields::MagicWeaponOrArmour {
            effects: row
                .get("effects")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        },
        ItemKind::LesserPotion | ItemKind::MagicItem => VariantFields::Plain,
    };

    MappedRow {
        die_roll,
        defaults: ItemDefaults {
            name: row.get("name").unwrap_or_default().to_string(),
            purchase: parse_optional_int(row.get("purchase")),
            sale: parse_optional_int(row.get("sale")),
            variant,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> ImportRow {
        ImportRow::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn elixir() -> ImportRow {
        row(&[
            ("die_roll", "5"),
            ("name", "Elixir"),
            ("purchase", "100"),
            ("sale", "50"),
            ("ingredient_cost", "20"),
        ])
    }

    #[test]
    fn test_unknown_tag_is_configuration_error() {
        let err = resolve_kind("unknown").unwrap_err();
        assert!(matches!(err, ImportError::Configuration(tag) if tag == "unknown"));
    }

    #[test]
    fn test_greater_potion_keeps_ingredient_cost() {
        let mapped = map_row(ItemKind::GreaterPotion, 5, &elixir());

        assert_eq!(mapped.die_roll, 5);
        assert_eq!(mapped.defaults.name, "Elixir");
        assert_eq!(mapped.defaults.purchase, Some(100));
        assert_eq!(mapped.defaults.sale, Some(50));
        assert_eq!(
            mapped.defaults.variant,
            VariantFields::GreaterPotion {
                ingredient_cost: Some(20)
            }
        );
    }

    #[test]
    fn test_lesser_potion_ignores_ingredient_cost() {
        let mapped = map_row(ItemKind::LesserPotion, 5, &elixir());
        assert_eq!(mapped.defaults.variant, VariantFields::Plain);
        assert_eq!(mapped.defaults.variant.ingredient_cost(), None);
    }

    #[test]
    fn test_weapon_reads_effects() {
        let r = row(&[
            ("die_roll", "3"),
            ("name", "Runed Axe"),
            ("purchase", ""),
            ("sale", ""),
            ("effects", "Ignores armour"),
        ]);
        let mapped = map_row(ItemKind::MagicWeaponOrArmour, 3, &r);

        assert_eq!(mapped.defaults.purchase, None);
        assert_eq!(mapped.defaults.variant.effects(), Some("Ignores armour"));
    }

    #[test]
    fn test_weapon_without_effects_column() {
        let r = row(&[("die_roll", "3"), ("name", "Axe"), ("purchase", "1"), ("sale", "1")]);
        let mapped = map_row(ItemKind::MagicWeaponOrArmour, 3, &r);
        assert_eq!(
            mapped.defaults.variant,
            VariantFields::MagicWeaponOrArmour { effects: None }
        );
    }

    #[test]
    fn test_dirty_numbers_become_absent() {
        let r = row(&[("die_roll", "8"), ("name", "Charm"), ("purchase", "n/a"), ("sale", "2,500")]);
        let mapped = map_row(ItemKind::MagicItem, 8, &r);

        assert_eq!(mapped.defaults.purchase, None);
        assert_eq!(mapped.defaults.sale, Some(2500));
    }
}
