//! Read-only listing queries

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{CatalogStore, StoreError};
use crate::core::item::{ItemKind, ItemRecord, RandomSpellRecord, TreasureRecord};

impl CatalogStore {
    /// All items of a kind, ordered by name
    pub fn list_items(&self, kind: ItemKind) -> Result<Vec<ItemRecord>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY name, id",
            item_columns(kind),
            kind.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| item_from_row(kind, row))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// First item carrying the given die roll
    pub fn find_by_die_roll(
        &self,
        kind: ItemKind,
        die_roll: i64,
    ) -> Result<Option<ItemRecord>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE die_roll = ?1 ORDER BY id LIMIT 1",
            item_columns(kind),
            kind.table()
        );
        Ok(self
            .conn
            .query_row(&sql, params![die_roll], |row| item_from_row(kind, row))
            .optional()?)
    }

    /// Treasure table ordered by die roll
    pub fn list_treasures(&self) -> Result<Vec<TreasureRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, die_roll, gold, multiply_gold_by_d20, result
             FROM treasures ORDER BY die_roll, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TreasureRecord {
                id: row.get(0)?,
                die_roll: row.get(1)?,
                gold: row.get(2)?,
                multiply_gold_by_d20: row.get::<_, i64>(3)? != 0,
                result: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Random spell table ordered by die roll
    pub fn list_random_spells(&self) -> Result<Vec<RandomSpellRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, die_roll, second_die_1_to_5, second_die_6_to_10,
                    second_die_11_to_15, second_die_16_to_20
             FROM random_spells ORDER BY die_roll, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RandomSpellRecord {
                id: row.get(0)?,
                die_roll: row.get(1)?,
                second_die_1_to_5: row.get(2)?,
                second_die_6_to_10: row.get(3)?,
                second_die_11_to_15: row.get(4)?,
                second_die_16_to_20: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

pub(super) fn get_item_on(
    conn: &Connection,
    kind: ItemKind,
    id: i64,
) -> Result<Option<ItemRecord>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        item_columns(kind),
        kind.table()
    );
    Ok(conn
        .query_row(&sql, params![id], |row| item_from_row(kind, row))
        .optional()?)
}

fn item_columns(kind: ItemKind) -> String {
    let extra = kind.variant_column().unwrap_or("NULL");
    format!("id, name, purchase, sale, die_roll, {}", extra)
}

fn item_from_row(kind: ItemKind, row: &Row<'_>) -> rusqlite::Result<ItemRecord> {
    let (ingredient_cost, effects) = match kind {
        ItemKind::GreaterPotion => (row.get(5)?, None),
        ItemKind::MagicWeaponOrArmour => (None, row.get(5)?),
        ItemKind::LesserPotion | ItemKind::MagicItem => (None, None),
    };

    Ok(ItemRecord {
        id: row.get(0)?,
        kind,
        name: row.get(1)?,
        purchase: row.get(2)?,
        sale: row.get(3)?,
        die_roll: row.get(4)?,
        ingredient_cost,
        effects,
    })
}
