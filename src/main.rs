//! A tool to convert Reflect journal exports into per-category CSV tables.
//!
//! # Overview
//!
//! `reflect-export` reads the JSON export produced by the Reflect journaling
//! app and turns it into one stable CSV table per reflection category. The
//! metrics attached to a category drift over time as the journal template is
//! edited; the converter reconciles every historical schema into a single set
//! of columns, filling the gaps from a configurable table of default values.
//!
//! # Quick Start
//!
//! Convert an export into a directory of CSV files:
//!
//! ```bash
//! reflect-export export reflections.json out/
//! ```
//!
//! # Basic Usage
//!
//! **Export only some categories:**
//! ```bash
//! reflect-export export reflections.json out/ --categories Morning,Evening
//! ```
//!
//! **Use a custom parsing options file:**
//! ```bash
//! reflect-export export reflections.json out/ --options my-options.yml
//! ```
//!
//! **Anonymize the output:**
//! ```bash
//! reflect-export export reflections.json out/ --anonymize
//! reflect-export export reflections.json out/ --anonymize --blank-values
//! ```
//!
//! Anonymization drops the Notes column content and replaces each distinct
//! text value with a stable placeholder; `--blank-values` empties the metric
//! cells entirely instead.
//!
//! # Parsing Options
//!
//! Three tables control what lands in a cell when a metric carries no value
//! of its own, keyed by metric kind (string, choice, bool, unit, rating,
//! scalar):
//!
//! - `defaults`: the metric appears in the reflection but was skipped
//! - `pre_metric_defaults`: rows that predate the metric's first appearance
//! - `post_metric_defaults`: rows after the metric stopped appearing
//!
//! **Generate a commented default options file:**
//! ```bash
//! reflect-export init reflect-options.yml
//! ```
//!
//! **Default search locations:**
//! - `reflect-options.toml`
//! - `reflect-options.yml`
//! - `reflect-options.yaml`
//! - `reflect-options.json`
//!
//! **Validate an options file:**
//! ```bash
//! reflect-export validate --options my-options.yml
//! ```
//!
//! # Output Format
//!
//! Each category table starts with the fixed columns `Timestamp`, `Date`,
//! `ID`, and `Notes`, followed by one column per metric in the order the
//! metrics first appeared, scanning reflections from newest to oldest. The
//! `Timestamp` column carries the export's raw numeric timestamps; `Date`
//! renders them as local time.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use reflect_export::Result;

mod commands;

use crate::commands::{ExportArgs, InitArgs, ValidateArgs, init_options, run_export, validate_options};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "reflect-export", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ExportSubcommand,
}

#[derive(Subcommand, Debug)]
enum ExportSubcommand {
    /// Convert a reflections JSON export into per-category CSV tables
    Export(ExportArgs),
    /// Generate a default parsing options file
    Init(InitArgs),
    /// Validate a parsing options file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    match &Cli::parse().command {
        ExportSubcommand::Export(export_args) => run_export(export_args),
        ExportSubcommand::Init(init_args) => init_options(init_args),
        ExportSubcommand::Validate(validate_args) => validate_options(validate_args),
    }
}
