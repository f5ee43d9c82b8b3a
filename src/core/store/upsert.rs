//! Keyed create-or-update for item tables

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::queries::get_item_on;
use super::StoreError;
use crate::core::item::{ItemDefaults, ItemKind, ItemRecord};

/// Run the lookup and the write inside one savepoint
///
/// Works both inside an open transaction and in autocommit mode.
pub(super) fn upsert_on(
    conn: &Connection,
    kind: ItemKind,
    die_roll: i64,
    defaults: &ItemDefaults,
) -> Result<(ItemRecord, bool), StoreError> {
    conn.execute_batch("SAVEPOINT item_upsert")?;

    match write_item(conn, kind, die_roll, defaults) {
        Ok(result) => {
            conn.execute_batch("RELEASE item_upsert")?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback) = conn.execute_batch("ROLLBACK TO item_upsert; RELEASE item_upsert")
            {
                tracing::warn!(error = %rollback, "failed to roll back item savepoint");
            }
            Err(e)
        }
    }
}

fn write_item(
    conn: &Connection,
    kind: ItemKind,
    die_roll: i64,
    defaults: &ItemDefaults,
) -> Result<(ItemRecord, bool), StoreError> {
    let table = kind.table();

    // Lowest id wins when several rows share a die roll
    let existing: Option<i64> = conn
        .query_row(
            &format!(
                "SELECT id FROM {} WHERE die_roll = ?1 ORDER BY id LIMIT 1",
                table
            ),
            params![die_roll],
            |row| row.get(0),
        )
        .optional()?;

    let mut columns = vec!["name", "purchase", "sale"];
    let mut values = vec![
        Value::Text(defaults.name.clone()),
        optional_int(defaults.purchase),
        optional_int(defaults.sale),
    ];
    match kind {
        ItemKind::GreaterPotion => {
            columns.push("ingredient_cost");
            values.push(optional_int(defaults.variant.ingredient_cost()));
        }
        ItemKind::MagicWeaponOrArmour => {
            columns.push("effects");
            values.push(
                defaults
                    .variant
                    .effects()
                    .map(|s| Value::Text(s.to_string()))
                    .unwrap_or(Value::Null),
            );
        }
        ItemKind::LesserPotion | ItemKind::MagicItem => {}
    }

    let (id, created) = match existing {
        Some(id) => {
            let assignments: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(i, col)| format!("{} = ?{}", col, i + 1))
                .collect();
            let sql = format!(
                "UPDATE {} SET {} WHERE id = ?{}",
                table,
                assignments.join(", "),
                columns.len() + 1
            );
            values.push(Value::Integer(id));
            conn.execute(&sql, params_from_iter(values.iter()))
                .map_err(|e| StoreError::from_write(table, e))?;
            (id, false)
        }
        None => {
            columns.push("die_roll");
            values.push(Value::Integer(die_roll));
            let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders.join(", ")
            );
            conn.execute(&sql, params_from_iter(values.iter()))
                .map_err(|e| StoreError::from_write(table, e))?;
            (conn.last_insert_rowid(), true)
        }
    };

    let record = get_item_on(conn, kind, id)?.ok_or_else(|| {
        StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
    })?;

    tracing::debug!(
        table,
        id,
        die_roll,
        created,
        "upserted item"
    );

    Ok((record, created))
}

fn optional_int(value: Option<i64>) -> Value {
    value.map(Value::Integer).unwrap_or(Value::Null)
}
