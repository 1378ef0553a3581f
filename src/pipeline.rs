// src/pipeline.rs

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::roles::{registry::check_role, resolve_labels, RegistryVerdict, RoleLabels, RoleRegistry};
use crate::seed::{
    assemble_schema, collect_rows, sort_rows, write_seed_csv, Collection, OutputSchema,
    SkippedSheet, PREFERRED_COLUMNS,
};
use crate::workbook::{SeedWorkbook, XlsxWorkbook};

/// Report of one successful run.
#[derive(Debug, Clone, Serialize)]
pub struct MaterializationResult {
    pub role: String,
    pub labels: RoleLabels,
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub sheets_scanned: usize,
    pub sheets_skipped: Vec<SkippedSheet>,
    pub rows_missing_identity: usize,
    pub rows_label_mismatch: usize,
    pub columns: OutputSchema,
    pub registry: RegistryVerdict,
}

/// Build the role-scoped seed CSV described by `config` from the workbook on
/// disk. The workbook is closed before rows are sorted and written.
pub fn materialize(
    config: &PipelineConfig,
    registry: Option<&dyn RoleRegistry>,
) -> Result<MaterializationResult> {
    let (verdict, labels) = prepare(config, registry);
    let collection = {
        let mut workbook = XlsxWorkbook::open(&config.workbook)?;
        collect_rows(&mut workbook, &config.role, &labels)?
    };
    finish(config, labels, verdict, collection)
}

/// Same as [`materialize`] over an already opened workbook.
pub fn materialize_from<W: SeedWorkbook>(
    workbook: &mut W,
    config: &PipelineConfig,
    registry: Option<&dyn RoleRegistry>,
) -> Result<MaterializationResult> {
    let (verdict, labels) = prepare(config, registry);
    let collection = collect_rows(workbook, &config.role, &labels)?;
    finish(config, labels, verdict, collection)
}

fn prepare(
    config: &PipelineConfig,
    registry: Option<&dyn RoleRegistry>,
) -> (RegistryVerdict, RoleLabels) {
    let verdict = check_role(registry, &config.role);
    let labels = resolve_labels(&config.role);
    info!(role = %config.role, labels = ?labels.as_slice(), "resolved labels");
    (verdict, labels)
}

fn finish(
    config: &PipelineConfig,
    labels: RoleLabels,
    verdict: RegistryVerdict,
    collection: Collection,
) -> Result<MaterializationResult> {
    let rows = sort_rows(collection.rows);
    let schema = assemble_schema(&PREFERRED_COLUMNS, &collection.union_headers);

    let output_path = config.resolved_output_path();
    let rows_written = write_seed_csv(&output_path, &config.role, &rows, &schema)?;

    Ok(MaterializationResult {
        role: config.role.clone(),
        labels,
        output_path,
        rows_written,
        sheets_scanned: collection.sheets_scanned,
        sheets_skipped: collection.skipped,
        rows_missing_identity: collection.rows_missing_identity,
        rows_label_mismatch: collection.rows_label_mismatch,
        columns: schema,
        registry: verdict,
    })
}
