//! `catalog template` command - Print an importable CSV skeleton

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::ItemKind;
use crate::import::{Importer, REQUIRED_COLUMNS};

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Item type (greaterpotion, lesserpotion, magicitem, magicweaponorarmour)
    pub item_type: String,
}

pub fn run(args: TemplateArgs) -> Result<()> {
    let kind = Importer::for_tag(&args.item_type)?.kind();

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(header(kind)).into_diagnostic()?;
    writer.write_record(example_row(kind)).into_diagnostic()?;
    writer.flush().into_diagnostic()?;

    eprintln!();
    eprintln!(
        "Save as a .csv file and run {}",
        style(format!("catalog import {} <file>", kind.tag())).yellow()
    );

    Ok(())
}

fn header(kind: ItemKind) -> Vec<&'static str> {
    let mut columns = REQUIRED_COLUMNS.to_vec();
    columns.extend(kind.variant_column());
    columns
}

fn example_row(kind: ItemKind) -> Vec<&'static str> {
    match kind {
        ItemKind::GreaterPotion => vec!["5", "Elixir of Might", "100", "50", "20"],
        ItemKind::LesserPotion => vec!["3", "Healing Draught", "25", "12"],
        ItemKind::MagicItem => vec!["7", "Cloak of Shadows", "1,200", "600"],
        ItemKind::MagicWeaponOrArmour => vec![
            "11",
            "Flame Blade",
            "2,000",
            "1,000",
            "Wielder's attacks count as magical and ignite the target",
        ],
    }
}
