use rusqlite::params;

use super::*;
use crate::core::item::VariantFields;

fn defaults(name: &str, purchase: Option<i64>, sale: Option<i64>) -> ItemDefaults {
    ItemDefaults {
        name: name.to_string(),
        purchase,
        sale,
        variant: VariantFields::Plain,
    }
}

#[test]
fn test_open_creates_all_tables() {
    let store = CatalogStore::open_in_memory().unwrap();
    let counts = store.table_counts().unwrap();

    assert_eq!(counts.len(), TABLES.len());
    assert!(counts.values().all(|&c| c == 0));
}

#[test]
fn test_open_on_disk_creates_parent_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested/catalog.db");

    let store = CatalogStore::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), Some(path.as_path()));
}

#[test]
fn test_reopen_keeps_data() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.db");

    {
        let mut store = CatalogStore::open(&path).unwrap();
        store
            .upsert_item(ItemKind::MagicItem, 4, &defaults("Cloak", Some(40), Some(20)))
            .unwrap();
    }

    let store = CatalogStore::open(&path).unwrap();
    assert_eq!(store.list_items(ItemKind::MagicItem).unwrap().len(), 1);
}

#[test]
fn test_schema_version_reads_stored_stamp() {
    let store = CatalogStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);

    store
        .conn()
        .execute("DELETE FROM schema_version", [])
        .unwrap();
    assert_eq!(store.schema_version().unwrap(), 0);

    store
        .conn()
        .execute("INSERT INTO schema_version (version) VALUES (?1)", params![7])
        .unwrap();
    assert_eq!(store.schema_version().unwrap(), 7);
}

#[test]
fn test_newer_schema_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.db");
    {
        let store = CatalogStore::open(&path).unwrap();
        store
            .conn()
            .execute("INSERT INTO schema_version (version) VALUES (?1)", params![99])
            .unwrap();
    }

    match CatalogStore::open(&path) {
        Err(StoreError::SchemaTooNew { found, supported }) => {
            assert_eq!(found, 99);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("expected SchemaTooNew, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_upsert_creates_then_updates() {
    let mut store = CatalogStore::open_in_memory().unwrap();

    let (first, created) = store
        .upsert_item(ItemKind::LesserPotion, 7, &defaults("Tonic", Some(10), Some(5)))
        .unwrap();
    assert!(created);
    assert_eq!(first.die_roll, Some(7));
    assert_eq!(first.name, "Tonic");

    let (second, created) = store
        .upsert_item(ItemKind::LesserPotion, 7, &defaults("Strong Tonic", Some(15), None))
        .unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.name, "Strong Tonic");
    assert_eq!(second.purchase, Some(15));
    assert_eq!(second.sale, None);

    assert_eq!(store.list_items(ItemKind::LesserPotion).unwrap().len(), 1);
}

#[test]
fn test_same_die_roll_in_other_table_is_independent() {
    let mut store = CatalogStore::open_in_memory().unwrap();

    store
        .upsert_item(ItemKind::LesserPotion, 3, &defaults("Tonic", None, None))
        .unwrap();
    let (_, created) = store
        .upsert_item(ItemKind::MagicItem, 3, &defaults("Ring", None, None))
        .unwrap();

    assert!(created);
}

#[test]
fn test_greater_potion_stores_ingredient_cost() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let item = ItemDefaults {
        name: "Elixir".to_string(),
        purchase: Some(100),
        sale: Some(50),
        variant: VariantFields::GreaterPotion {
            ingredient_cost: Some(20),
        },
    };

    let (record, _) = store
        .upsert_item(ItemKind::GreaterPotion, 5, &item)
        .unwrap();
    assert_eq!(record.ingredient_cost, Some(20));
    assert_eq!(record.effects, None);
}

#[test]
fn test_weapon_stores_effects() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let item = ItemDefaults {
        name: "Flame Blade".to_string(),
        purchase: Some(1200),
        sale: None,
        variant: VariantFields::MagicWeaponOrArmour {
            effects: Some("+1 to hit, sets target alight".to_string()),
        },
    };

    let (record, _) = store
        .upsert_item(ItemKind::MagicWeaponOrArmour, 11, &item)
        .unwrap();
    let found = store
        .find_by_die_roll(ItemKind::MagicWeaponOrArmour, 11)
        .unwrap()
        .unwrap();

    assert_eq!(found, record);
    assert_eq!(found.effects.as_deref(), Some("+1 to hit, sets target alight"));
}

#[test]
fn test_negative_value_is_constraint_violation() {
    let mut store = CatalogStore::open_in_memory().unwrap();

    let err = store
        .upsert_item(ItemKind::MagicItem, 2, &defaults("Cursed Coin", Some(-5), None))
        .unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err}");

    let err = store
        .upsert_item(ItemKind::MagicItem, -2, &defaults("Cursed Coin", None, None))
        .unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err}");

    assert!(store.list_items(ItemKind::MagicItem).unwrap().is_empty());
}

#[test]
fn test_failed_update_leaves_row_untouched() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    store
        .upsert_item(ItemKind::MagicItem, 2, &defaults("Ring", Some(50), Some(25)))
        .unwrap();

    let err = store
        .upsert_item(ItemKind::MagicItem, 2, &defaults("Ring", Some(-1), Some(25)))
        .unwrap_err();
    assert!(err.is_constraint());

    let record = store.find_by_die_roll(ItemKind::MagicItem, 2).unwrap().unwrap();
    assert_eq!(record.purchase, Some(50));
}

#[test]
fn test_duplicate_rows_update_lowest_id() {
    let store = CatalogStore::open_in_memory().unwrap();
    store
        .conn()
        .execute_batch(
            "INSERT INTO magic_items (name, die_roll) VALUES ('First', 9);
             INSERT INTO magic_items (name, die_roll) VALUES ('Second', 9);",
        )
        .unwrap();

    let mut store = store;
    let (record, created) = store
        .upsert_item(ItemKind::MagicItem, 9, &defaults("Replaced", None, None))
        .unwrap();

    assert!(!created);
    assert_eq!(record.id, 1);
    assert_eq!(record.name, "Replaced");
}

#[test]
fn test_session_rollback_discards_writes() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    {
        let mut session = store.session().unwrap();
        session
            .upsert_item(ItemKind::LesserPotion, 1, &defaults("Tonic", None, None))
            .unwrap();
        session.rollback().unwrap();
    }
    assert!(store.list_items(ItemKind::LesserPotion).unwrap().is_empty());

    {
        let mut session = store.session().unwrap();
        session
            .upsert_item(ItemKind::LesserPotion, 1, &defaults("Tonic", None, None))
            .unwrap();
        session.commit().unwrap();
    }
    assert_eq!(store.list_items(ItemKind::LesserPotion).unwrap().len(), 1);
}

#[test]
fn test_session_survives_row_constraint_failure() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    {
        let mut session = store.session().unwrap();
        session
            .upsert_item(ItemKind::MagicItem, 1, &defaults("Ring", None, None))
            .unwrap();
        assert!(session
            .upsert_item(ItemKind::MagicItem, 2, &defaults("Bad", Some(-1), None))
            .is_err());
        session
            .upsert_item(ItemKind::MagicItem, 3, &defaults("Amulet", None, None))
            .unwrap();
        session.commit().unwrap();
    }

    let names: Vec<String> = store
        .list_items(ItemKind::MagicItem)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Amulet", "Ring"]);
}

#[test]
fn test_list_treasures_and_spells() {
    let store = CatalogStore::open_in_memory().unwrap();
    store
        .conn()
        .execute_batch(
            "INSERT INTO treasures (die_roll, gold, multiply_gold_by_d20, result)
                 VALUES (12, 5, 1, NULL), (3, 100, 0, 'A gem');
             INSERT INTO random_spells (die_roll, second_die_1_to_5) VALUES (1, 'Fizzle');",
        )
        .unwrap();

    let treasures = store.list_treasures().unwrap();
    assert_eq!(treasures.len(), 2);
    assert_eq!(treasures[0].die_roll, Some(3));
    assert_eq!(treasures[0].result.as_deref(), Some("A gem"));
    assert!(treasures[1].multiply_gold_by_d20);

    let spells = store.list_random_spells().unwrap();
    assert_eq!(spells[0].second_die_1_to_5.as_deref(), Some("Fizzle"));
    assert_eq!(spells[0].second_die_6_to_10, None);
}

#[test]
fn test_query_raw_rejects_writes() {
    let store = CatalogStore::open_in_memory().unwrap();

    let (columns, rows) = store
        .query_raw("SELECT COUNT(*) AS n FROM magic_items")
        .unwrap();
    assert_eq!(columns, vec!["n"]);
    assert_eq!(rows, vec![vec!["0".to_string()]]);

    let err = store.query_raw("DELETE FROM magic_items").unwrap_err();
    assert!(matches!(err, StoreError::ReadOnly(_)));
}
