use crate::commands::common::{LogLevel, init_logging};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use reflect_export::Result;
use reflect_export::convert::{Row, build_tables};
use reflect_export::export::{Anonymizer, export_tables};
use reflect_export::metric::parse_reflections;
use reflect_export::options::ParsingOptions;
use std::collections::HashSet;
use std::fs;

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Path to the reflections JSON export
    #[arg(value_name = "JSON_PATH")]
    pub json_path: Utf8PathBuf,

    /// Directory to write the per-category CSV files into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Utf8PathBuf,

    /// Comma-separated category names to export [default: all categories]
    #[arg(long, short = 'c', value_name = "NAMES", value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Path to parsing options file [default: one of reflect-options.[toml|yml|yaml|json] ]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub options: Option<Utf8PathBuf>,

    /// Replace identifying text with placeholders and drop notes
    #[arg(long, short = 'a')]
    pub anonymize: bool,

    /// Blank every metric cell instead of substituting placeholders
    #[arg(long, short = 'b', requires = "anonymize")]
    pub blank_values: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    init_logging(args.log_level);

    let options = ParsingOptions::load(Utf8Path::new("."), args.options.as_ref())?;

    let json = fs::read_to_string(&args.json_path).into_app_err_with(|| format!("reading reflections from {}", args.json_path))?;
    let reflections = parse_reflections(&json)?;
    let tables = build_tables(reflections, &options)?;

    let filter: Option<HashSet<String>> = args.categories.as_ref().map(|names| names.iter().cloned().collect());

    let written = if args.anonymize {
        let anonymizer = Anonymizer::new(args.blank_values);
        let hook = |category: &str, row: &Row| anonymizer.apply(category, row);
        export_tables(&tables, &args.output_dir, filter.as_ref(), Some(&hook))?
    } else {
        export_tables(&tables, &args.output_dir, filter.as_ref(), None)?
    };

    println!("Wrote {} category table(s) to {}", written, args.output_dir);
    Ok(())
}
