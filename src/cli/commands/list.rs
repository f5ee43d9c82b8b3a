//! `catalog list` command - Read-only listings of catalog tables

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{effective_format, open_catalog, opt, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CatalogStore, ItemKind, ItemRecord, RandomSpellRecord, TreasureRecord};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Table to list
    #[arg(value_enum)]
    pub table: CatalogTable,
}

/// Every table that can be listed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogTable {
    #[value(alias = "greaterpotion")]
    GreaterPotion,
    #[value(alias = "lesserpotion")]
    LesserPotion,
    #[value(alias = "magicitem")]
    MagicItem,
    #[value(alias = "magicweaponorarmour")]
    MagicWeaponOrArmour,
    Treasure,
    #[value(alias = "randomspell")]
    RandomSpell,
}

impl CatalogTable {
    fn item_kind(self) -> Option<ItemKind> {
        match self {
            CatalogTable::GreaterPotion => Some(ItemKind::GreaterPotion),
            CatalogTable::LesserPotion => Some(ItemKind::LesserPotion),
            CatalogTable::MagicItem => Some(ItemKind::MagicItem),
            CatalogTable::MagicWeaponOrArmour => Some(ItemKind::MagicWeaponOrArmour),
            CatalogTable::Treasure | CatalogTable::RandomSpell => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CatalogTable::GreaterPotion => "greater potion(s)",
            CatalogTable::LesserPotion => "lesser potion(s)",
            CatalogTable::MagicItem => "magic item(s)",
            CatalogTable::MagicWeaponOrArmour => "magic weapon(s) or armour",
            CatalogTable::Treasure => "treasure result(s)",
            CatalogTable::RandomSpell => "random spell(s)",
        }
    }
}

/// Column names plus stringified cells
struct Rows {
    headers: Vec<&'static str>,
    cells: Vec<Vec<String>>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = effective_format(global.format, &catalog.config);

    match format {
        OutputFormat::Json => print_json(&catalog.store, args.table),
        _ => {
            let rows = load_rows(&catalog.store, args.table)?;
            match format {
                OutputFormat::Csv => write_delimited(&rows, b','),
                OutputFormat::Tsv => write_delimited(&rows, b'\t'),
                _ => {
                    print_table(&rows, args.table, global.quiet);
                    Ok(())
                }
            }
        }
    }
}

fn print_json(store: &CatalogStore, table: CatalogTable) -> Result<()> {
    let json = match table.item_kind() {
        Some(kind) => to_json(&store.list_items(kind).into_diagnostic()?)?,
        None if table == CatalogTable::Treasure => {
            to_json(&store.list_treasures().into_diagnostic()?)?
        }
        None => to_json(&store.list_random_spells().into_diagnostic()?)?,
    };
    println!("{}", json);
    Ok(())
}

fn to_json<T: Serialize>(records: &[T]) -> Result<String> {
    serde_json::to_string_pretty(records).into_diagnostic()
}

fn load_rows(store: &CatalogStore, table: CatalogTable) -> Result<Rows> {
    let rows = match table.item_kind() {
        Some(kind) => item_rows(kind, &store.list_items(kind).into_diagnostic()?),
        None if table == CatalogTable::Treasure => {
            treasure_rows(&store.list_treasures().into_diagnostic()?)
        }
        None => spell_rows(&store.list_random_spells().into_diagnostic()?),
    };
    Ok(rows)
}

fn item_rows(kind: ItemKind, records: &[ItemRecord]) -> Rows {
    let mut headers = vec!["id", "die_roll", "name", "purchase", "sale"];
    if let Some(column) = kind.variant_column() {
        headers.push(column);
    }

    let cells = records
        .iter()
        .map(|r| {
            let mut row = vec![
                r.id.to_string(),
                opt(&r.die_roll),
                r.name.clone(),
                opt(&r.purchase),
                opt(&r.sale),
            ];
            match kind {
                ItemKind::GreaterPotion => row.push(opt(&r.ingredient_cost)),
                ItemKind::MagicWeaponOrArmour => row.push(opt(&r.effects)),
                ItemKind::LesserPotion | ItemKind::MagicItem => {}
            }
            row
        })
        .collect();

    Rows { headers, cells }
}

fn treasure_rows(records: &[TreasureRecord]) -> Rows {
    Rows {
        headers: vec!["id", "die_roll", "gold", "multiply_gold_by_d20", "result"],
        cells: records
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    opt(&r.die_roll),
                    opt(&r.gold),
                    r.multiply_gold_by_d20.to_string(),
                    opt(&r.result),
                ]
            })
            .collect(),
    }
}

fn spell_rows(records: &[RandomSpellRecord]) -> Rows {
    Rows {
        headers: vec![
            "id",
            "die_roll",
            "second_die_1_to_5",
            "second_die_6_to_10",
            "second_die_11_to_15",
            "second_die_16_to_20",
        ],
        cells: records
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    opt(&r.die_roll),
                    opt(&r.second_die_1_to_5),
                    opt(&r.second_die_6_to_10),
                    opt(&r.second_die_11_to_15),
                    opt(&r.second_die_16_to_20),
                ]
            })
            .collect(),
    }
}

fn write_delimited(rows: &Rows, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(io::stdout());
    writer.write_record(&rows.headers).into_diagnostic()?;
    for row in &rows.cells {
        writer.write_record(row).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}

fn print_table(rows: &Rows, table: CatalogTable, quiet: bool) {
    if rows.cells.is_empty() {
        println!("No {} found.", table.label());
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(rows.headers.iter().map(|h| h.to_string()));
    for row in &rows.cells {
        builder.push_record(row.iter().map(|cell| truncate_str(cell, 48)));
    }

    let mut rendered = builder.build();
    rendered.with(Style::markdown());
    println!("{}", rendered);

    if !quiet {
        println!();
        println!(
            "{}",
            style(format!("{} {} found", rows.cells.len(), table.label())).dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion(id: i64, name: &str, cost: Option<i64>) -> ItemRecord {
        ItemRecord {
            id,
            kind: ItemKind::GreaterPotion,
            name: name.to_string(),
            purchase: Some(100),
            sale: None,
            die_roll: Some(id),
            ingredient_cost: cost,
            effects: None,
        }
    }

    #[test]
    fn test_item_rows_include_variant_column() {
        let rows = item_rows(
            ItemKind::GreaterPotion,
            &[potion(1, "Elixir", Some(20)), potion(2, "Tonic", None)],
        );

        assert_eq!(
            rows.headers,
            vec!["id", "die_roll", "name", "purchase", "sale", "ingredient_cost"]
        );
        assert_eq!(rows.cells[0], vec!["1", "1", "Elixir", "100", "", "20"]);
        assert_eq!(rows.cells[1][5], "");
    }

    #[test]
    fn test_plain_item_rows_have_no_variant_column() {
        let rows = item_rows(ItemKind::MagicItem, &[]);
        assert_eq!(rows.headers, vec!["id", "die_roll", "name", "purchase", "sale"]);
    }

    #[test]
    fn test_treasure_rows_render_flag() {
        let rows = treasure_rows(&[TreasureRecord {
            id: 1,
            die_roll: Some(20),
            gold: Some(10),
            multiply_gold_by_d20: true,
            result: None,
        }]);
        assert_eq!(rows.cells[0], vec!["1", "20", "10", "true", ""]);
    }
}
