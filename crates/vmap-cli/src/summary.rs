use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use vmap_registry::RefreshOutcome;
use vmap_report::MappingAnalysis;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_refresh(outcome: &RefreshOutcome, persistent: &Path) {
    println!(
        "Scanned {} candidate file(s), {} pair(s)",
        outcome.files_scanned, outcome.candidate_pairs
    );
    match outcome.id_range {
        Some((first, last)) => {
            println!("Found {} new value entries", outcome.appended);
            println!("ID range for new rows: [{first}..{last}]");
            println!("Updated {}", persistent.display());
        }
        None => println!("No new rows added"),
    }
}

pub fn print_analysis(analysis: &MappingAnalysis) {
    let mut table = Table::new();
    table.set_header(vec!["Section", "Key", "Count"]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let sections: [(&str, &std::collections::BTreeMap<String, usize>); 3] = [
        ("equivalence", &analysis.equivalence),
        ("unmapped", &analysis.unmapped),
        ("wider", &analysis.wider),
    ];
    for (section, counts) in sections {
        for (key, count) in counts {
            table.add_row(vec![Cell::new(section), Cell::new(key), Cell::new(*count)]);
        }
    }
    println!("{table}");
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
