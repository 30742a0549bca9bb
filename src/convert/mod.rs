//! The temporal reconciliation engine.
//!
//! Reflections are processed most-recent-first in a single pass, each routed
//! to its category's accumulator. A category's column set only grows: a column
//! the category tracks but a reflection no longer carries is filled from the
//! post-metric table, and a newly introduced column retroactively fills every
//! row accumulated earlier in the pass from the pre-metric table. "Earlier in
//! the pass" means more recent in time under the descending order; the default
//! tables are selected relative to processing order, not chronology.
//!
//! Backfilling rewrites rows already appended, so each accumulator keeps its
//! rows in an indexable `Vec` rather than streaming them out. Categories share
//! no state with one another.

mod timestamp;

pub use timestamp::{EPOCH_OFFSET_SECONDS, normalize_timestamp};

use crate::Result;
use crate::metric::{CellValue, MetricKind, RawReflection, decode_metric};
use crate::options::ParsingOptions;
use std::collections::{BTreeMap, HashMap};

/// Log target for the reconciliation engine
const LOG_TARGET: &str = "convert";

/// One table row: the four fixed fields plus one cell per known column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: f64,
    pub date: String,
    pub id: String,
    pub notes: Option<String>,
    pub cells: HashMap<String, CellValue>,
}

/// The accumulated table for one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    columns: Vec<String>,
    kinds: HashMap<String, MetricKind>,
    rows: Vec<Row>,
}

impl CategoryTable {
    /// Metric columns in the order they were first observed during the pass.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in processing order (most recent first).
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The most recently observed kind for a metric column.
    #[must_use]
    pub fn kind_of(&self, column: &str) -> Option<MetricKind> {
        self.kinds.get(column).copied()
    }

    fn absorb(&mut self, reflection: &RawReflection, options: &ParsingOptions) -> Result<()> {
        let (timestamp, date) = normalize_timestamp(reflection.date)?;

        // Decode everything up front: a malformed metric must abort the whole
        // reflection without committing a partial row.
        let mut decoded = Vec::with_capacity(reflection.metrics.len());
        for raw in &reflection.metrics {
            decoded.push(decode_metric(raw)?);
        }

        let mut cells = HashMap::with_capacity(decoded.len());
        let mut introduced: Vec<String> = Vec::new();

        for metric in decoded {
            if let Some(previous) = self.kinds.insert(metric.name.clone(), metric.kind)
                && previous != metric.kind
            {
                log::warn!(
                    target: LOG_TARGET,
                    "metric '{}' in category '{}' changed kind from {previous} to {}; keeping the newest",
                    metric.name,
                    reflection.name,
                    metric.kind
                );
            }

            if !self.columns.contains(&metric.name) && !introduced.contains(&metric.name) {
                introduced.push(metric.name.clone());
            }

            let value = metric.value.unwrap_or_else(|| options.skipped(metric.kind).clone());

            // Duplicate names within one reflection: the later entry wins.
            let _ = cells.insert(metric.name, value);
        }

        // Columns this category already tracks but this reflection no longer
        // carries get the post-metric filler for their last-known kind.
        for column in &self.columns {
            if !cells.contains_key(column)
                && let Some(kind) = self.kinds.get(column)
            {
                let _ = cells.insert(column.clone(), options.post_metric(*kind).clone());
            }
        }

        // Newly introduced columns: every row accumulated so far predates the
        // column in pass order and gets the pre-metric filler.
        for column in introduced {
            if let Some(kind) = self.kinds.get(&column) {
                let filler = options.pre_metric(*kind).clone();
                for row in &mut self.rows {
                    let _ = row.cells.insert(column.clone(), filler.clone());
                }
            }
            self.columns.push(column);
        }

        self.rows.push(Row {
            timestamp,
            date,
            id: reflection.id.clone(),
            notes: reflection.notes.clone(),
            cells,
        });

        Ok(())
    }
}

/// Build one table per category from a flat list of reflections.
///
/// # Errors
///
/// Returns an error on the first reflection with a non-finite timestamp or an
/// undecodable metric; nothing of that reflection is committed.
pub fn build_tables(mut reflections: Vec<RawReflection>, options: &ParsingOptions) -> Result<BTreeMap<String, CategoryTable>> {
    // Most recent first. The sort is stable, so reflections with identical
    // timestamps keep their document order and reruns are deterministic.
    reflections.sort_by(|a, b| b.date.total_cmp(&a.date));

    let mut tables: BTreeMap<String, CategoryTable> = BTreeMap::new();
    for reflection in &reflections {
        let table = tables.entry(reflection.name.clone()).or_default();
        table.absorb(reflection, options)?;
    }

    log::debug!(target: LOG_TARGET, "built {} category table(s) from {} reflection(s)", tables.len(), reflections.len());
    Ok(tables)
}
