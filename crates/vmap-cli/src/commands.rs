use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use vmap_ingest::{
    load_concept_index, load_element_index, load_mapping_records, load_value_index,
};
use vmap_model::DataTable;
use vmap_registry::{Registry, RegistryPaths, exports_root, resources_root};
use vmap_report::{
    analyze_mapping, analyze_mapping_folded, element_rows, value_rows, write_sssom_tsv,
};
use vmap_store::Salt;

use crate::cli::{
    AnalyzeArgs, InitSaltArgs, InvalidateArgs, MappingKindArg, RegistryArgs, SealArgs, SssomArgs,
    UnsealArgs,
};
use crate::logging::redact_value;
use crate::password::{prompt_password_once, prompt_password_twice};
use crate::summary::{print_analysis, print_refresh};

fn registry_for(args: &RegistryArgs) -> Registry {
    let resources = args.resources.clone().unwrap_or_else(resources_root);
    let exports = args.exports.clone().unwrap_or_else(exports_root);
    Registry::new(RegistryPaths::from_roots(&resources, &exports))
}

pub fn run_init(args: &RegistryArgs) -> Result<()> {
    let registry = registry_for(args);
    registry.initialize().context("initialize registry")?;
    println!(
        "Initialized definition table at {}",
        registry.paths().persistent.display()
    );
    println!(
        "Candidate directory: {}",
        registry.paths().candidate_dir.display()
    );
    Ok(())
}

pub fn run_refresh(args: &RegistryArgs) -> Result<()> {
    let registry = registry_for(args);
    let outcome = registry
        .refresh(Local::now().date_naive())
        .context("refresh registry")?;
    print_refresh(&outcome, &registry.paths().persistent);
    Ok(())
}

pub fn run_invalidate(args: &InvalidateArgs) -> Result<()> {
    let registry = registry_for(&args.registry);
    let count = registry
        .set_invalid(&args.ids, Local::now().date_naive())
        .context("invalidate records")?;
    if let Ok(records) = registry.records() {
        for &id in &args.ids {
            if let Some(record) = records.get(id as usize) {
                debug!(id, cui = %record.cui, value = redact_value(&record.value), "invalidated");
            }
        }
    }
    println!("Set {count} record(s) as invalid");
    Ok(())
}

pub fn run_init_salt(args: &InitSaltArgs) -> Result<()> {
    Salt::generate(&args.path).context("generate salt")?;
    println!("Wrote salt to {}", args.path.display());
    Ok(())
}

pub fn run_seal(args: &SealArgs) -> Result<()> {
    let table = read_table(&args.input)?;
    let salt = Salt::load(&args.salt).context("load salt")?;
    let password = prompt_password_twice("Password for sealed table")?;
    vmap_store::store(&table, &args.output, &password, &salt).context("seal table")?;
    println!(
        "Sealed {} row(s) into {}",
        table.row_count(),
        args.output.display()
    );
    Ok(())
}

pub fn run_unseal(args: &UnsealArgs) -> Result<()> {
    let salt = Salt::load(&args.salt).context("load salt")?;
    let password = prompt_password_once("Password for sealed table")?;
    let table = vmap_store::load(&args.input, &password, &salt).context("unseal table")?;
    write_table(&args.output, &table)?;
    println!(
        "Unsealed {} row(s) into {}",
        table.row_count(),
        args.output.display()
    );
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let records = load_mapping_records(&args.mapping).context("load mapping table")?;
    let exclusions: Vec<&str> = args.exclude.iter().map(String::as_str).collect();
    let analysis = match &args.elements {
        Some(elements_path) => {
            let elements = load_element_index(elements_path).context("load element definitions")?;
            analyze_mapping_folded(&records, &exclusions, &elements)
        }
        None => analyze_mapping(&records, &exclusions),
    }
    .context("analyze mapping table")?;

    if let Some(json_path) = &args.json {
        let json = serde_json::to_string_pretty(&analysis).context("serialize analysis")?;
        std::fs::write(json_path, json)
            .with_context(|| format!("write analysis to {}", json_path.display()))?;
    }
    println!("Analyzed {} mapping row(s)", records.len());
    print_analysis(&analysis);
    Ok(())
}

pub fn run_sssom(args: &SssomArgs) -> Result<()> {
    let records = load_mapping_records(&args.mapping).context("load mapping table")?;
    let elements = load_element_index(&args.element_defs).context("load element definitions")?;
    let vocabularies: Vec<&str> = args.vocabularies.iter().map(String::as_str).collect();
    let concepts =
        load_concept_index(&args.concepts, &vocabularies).context("load concept table")?;

    let rows = match args.kind {
        MappingKindArg::Elements => element_rows(&records, &elements, &concepts),
        MappingKindArg::Values => {
            let value_defs = args
                .value_defs
                .as_ref()
                .context("--value-defs is required for value mappings")?;
            let values = load_value_index(value_defs).context("load value definitions")?;
            value_rows(&records, &values, &elements, &concepts)
        }
    }
    .context("transform mapping table")?;

    write_sssom_tsv(&args.out, &rows).context("write SSSOM export")?;
    println!(
        "Exported {} of {} row(s) to {}",
        rows.len(),
        records.len(),
        args.out.display()
    );
    Ok(())
}

fn read_table(path: &Path) -> Result<DataTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read headers: {}", path.display()))?
        .clone();
    let mut table = DataTable::new(
        headers
            .iter()
            .map(|h| h.trim_matches('\u{feff}').to_string())
            .collect(),
    );
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        table.push_row(record.iter().map(ToString::to_string).collect());
    }
    Ok(table)
}

fn write_table(path: &Path, table: &DataTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("write csv: {}", path.display()))?;
    writer
        .write_record(&table.columns)
        .with_context(|| format!("write headers: {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .with_context(|| format!("write record: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}
