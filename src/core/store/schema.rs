//! Database schema initialization

use rusqlite::{params, OptionalExtension};

use super::{CatalogStore, StoreError, SCHEMA_VERSION};

impl CatalogStore {
    /// Create missing tables and stamp the schema version
    ///
    /// Existing data is never dropped. A database written by a newer binary is
    /// rejected instead of being reinterpreted.
    pub(super) fn init_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);",
        )?;

        let found: Option<i32> = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })
            .optional()?
            .flatten();

        if let Some(found) = found {
            if found > SCHEMA_VERSION {
                return Err(StoreError::SchemaTooNew {
                    found,
                    supported: SCHEMA_VERSION,
                });
            }
        }

        self.conn.execute_batch(
            r#"
            -- Item tables share name/purchase/sale/die_roll
            CREATE TABLE IF NOT EXISTS greater_potions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                purchase INTEGER CHECK (purchase IS NULL OR purchase >= 0),
                sale INTEGER CHECK (sale IS NULL OR sale >= 0),
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0),
                ingredient_cost INTEGER CHECK (ingredient_cost IS NULL OR ingredient_cost >= 0)
            );
            CREATE INDEX IF NOT EXISTS idx_greater_potions_die_roll ON greater_potions(die_roll);

            CREATE TABLE IF NOT EXISTS lesser_potions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                purchase INTEGER CHECK (purchase IS NULL OR purchase >= 0),
                sale INTEGER CHECK (sale IS NULL OR sale >= 0),
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0)
            );
            CREATE INDEX IF NOT EXISTS idx_lesser_potions_die_roll ON lesser_potions(die_roll);

            CREATE TABLE IF NOT EXISTS magic_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                purchase INTEGER CHECK (purchase IS NULL OR purchase >= 0),
                sale INTEGER CHECK (sale IS NULL OR sale >= 0),
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0)
            );
            CREATE INDEX IF NOT EXISTS idx_magic_items_die_roll ON magic_items(die_roll);

            CREATE TABLE IF NOT EXISTS magic_weapons_or_armour (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                purchase INTEGER CHECK (purchase IS NULL OR purchase >= 0),
                sale INTEGER CHECK (sale IS NULL OR sale >= 0),
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0),
                effects TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_magic_weapons_or_armour_die_roll
                ON magic_weapons_or_armour(die_roll);

            -- Lookup tables without an importer
            CREATE TABLE IF NOT EXISTS treasures (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0),
                gold INTEGER CHECK (gold IS NULL OR gold >= 0),
                multiply_gold_by_d20 INTEGER NOT NULL DEFAULT 0,
                result TEXT
            );

            CREATE TABLE IF NOT EXISTS random_spells (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                die_roll INTEGER CHECK (die_roll IS NULL OR die_roll >= 0),
                second_die_1_to_5 TEXT,
                second_die_6_to_10 TEXT,
                second_die_11_to_15 TEXT,
                second_die_16_to_20 TEXT
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}
