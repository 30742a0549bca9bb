//! CSV serialization of the per-category tables.

mod anonymize;

pub use anonymize::Anonymizer;

use crate::Result;
use crate::convert::{CategoryTable, Row};
use crate::metric::CellValue;
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use std::collections::{BTreeMap, HashSet};
use std::fs;

/// Log target for the exporter
const LOG_TARGET: &str = "export";

/// Hook applied to each row before serialization, keyed by category name.
pub type AnonymizeHook<'a> = &'a dyn Fn(&str, &Row) -> Row;

/// Write one CSV file per selected category into `output_dir`, returning the
/// number of files written.
///
/// A failure for one category is logged and does not prevent attempting the
/// others; the failed categories are reported together at the end.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or any selected
/// category cannot be written.
pub fn export_tables(
    tables: &BTreeMap<String, CategoryTable>,
    output_dir: &Utf8Path,
    filter: Option<&HashSet<String>>,
    anonymize: Option<AnonymizeHook<'_>>,
) -> Result<usize> {
    fs::create_dir_all(output_dir).into_app_err_with(|| format!("creating output directory {output_dir}"))?;

    let mut failed: Vec<&str> = Vec::new();
    let mut written = 0usize;

    for (name, table) in tables {
        if let Some(filter) = filter
            && !filter.contains(name)
        {
            continue;
        }

        let path = output_dir.join(format!("{name}.csv"));
        match export_category(name, table, &path, anonymize) {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "wrote {} row(s) for category '{}' to {}", table.rows().len(), name, path);
                written += 1;
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "unable to export category '{name}': {e}");
                failed.push(name);
            }
        }
    }

    if failed.is_empty() {
        Ok(written)
    } else {
        Err(app_err!("failed to export {} category table(s): {}", failed.len(), failed.join(", ")))
    }
}

/// Columns come out as the four fixed fields followed by the table's metric
/// columns in accumulation order; rows keep the reconciliation pass order.
fn export_category(name: &str, table: &CategoryTable, path: &Utf8Path, anonymize: Option<AnonymizeHook<'_>>) -> Result<()> {
    let file = fs::File::create(path).into_app_err_with(|| format!("creating {path}"))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = Vec::with_capacity(4 + table.columns().len());
    header.extend(["Timestamp", "Date", "ID", "Notes"].map(String::from));
    header.extend(table.columns().iter().cloned());
    writer.write_record(&header).into_app_err_with(|| format!("writing {path}"))?;

    for row in table.rows() {
        let transformed;
        let row = if let Some(hook) = anonymize {
            transformed = hook(name, row);
            &transformed
        } else {
            row
        };

        let mut record = Vec::with_capacity(header.len());
        record.push(CellValue::Number(row.timestamp).to_field());
        record.push(row.date.clone());
        record.push(row.id.clone());
        record.push(row.notes.clone().unwrap_or_default());
        for column in table.columns() {
            record.push(row.cells.get(column).map(CellValue::to_field).unwrap_or_default());
        }

        writer.write_record(&record).into_app_err_with(|| format!("writing {path}"))?;
    }

    writer.flush().into_app_err_with(|| format!("writing {path}"))?;
    Ok(())
}
