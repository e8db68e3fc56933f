use anyhow::Result;
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use compliance_core::Profile;

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

pub fn profiles_table(profiles: &[Profile]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Title", "Version"]);
    for profile in profiles {
        table.add_row(vec![
            Cell::new(profile.id()),
            Cell::new(&profile.title),
            Cell::new(&profile.version),
        ]);
    }
    table
}

/// Two-column key/value listing.
pub fn details_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table
}
