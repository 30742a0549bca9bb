//! Parsing options: the three default tables threaded through a run.
//!
//! An options document can override individual entries; everything else keeps
//! the built-ins. The tables are built once per run and passed by reference so
//! runs with different options never interfere.

use crate::Result;
use crate::metric::{CellValue, MetricKind};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use strum::IntoEnumIterator;

/// The default options YAML content, embedded from `default_options.yml`
pub const DEFAULT_OPTIONS_YAML: &str = include_str!("../../default_options.yml");

/// The options document as written on disk: three partial per-kind tables.
/// A key naming an unrecognized kind or an unrecognized section fails
/// deserialization outright.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct OptionsDoc {
    #[serde(default)]
    defaults: HashMap<MetricKind, CellValue>,

    #[serde(default)]
    pre_metric_defaults: HashMap<MetricKind, CellValue>,

    #[serde(default)]
    post_metric_defaults: HashMap<MetricKind, CellValue>,
}

/// Fully resolved default tables, one entry per kind in each.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingOptions {
    defaults: HashMap<MetricKind, CellValue>,
    pre_metric_defaults: HashMap<MetricKind, CellValue>,
    post_metric_defaults: HashMap<MetricKind, CellValue>,
}

impl ParsingOptions {
    /// Load parsing options from a file or use the built-in defaults
    ///
    /// When no explicit path is given, probes `reflect-options.[toml|yml|yaml|json]`
    /// under `base`; if none exists the built-ins are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base: &Utf8Path, options_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = options_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading parsing options from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base.join("reflect-options.toml"),
                base.join("reflect-options.yml"),
                base.join("reflect-options.yaml"),
                base.join("reflect-options.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading parsing options from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok(Self::default());
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let doc: OptionsDoc = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML options from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML options from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON options from {final_path}"))?,
            _ => return Err(app_err!("unsupported options file extension: {extension}")),
        };

        Ok(Self::with_overrides(doc))
    }

    /// Parse an options document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid options document
    pub fn from_yaml(text: &str) -> Result<Self> {
        let doc: OptionsDoc = serde_yaml::from_str(text).into_app_err("parsing YAML options")?;
        Ok(Self::with_overrides(doc))
    }

    /// Write the default options document, preserving comments for YAML output
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn write_default(output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "yml" | "yaml" => DEFAULT_OPTIONS_YAML.to_string(),
            "toml" => toml::to_string_pretty(&Self::default().as_doc())
                .into_app_err_with(|| format!("serializing default options to TOML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(&Self::default().as_doc())
                .into_app_err_with(|| format!("serializing default options to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported options file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing default options to {output_path}"))?;
        Ok(())
    }

    /// Default for a metric that is present in a reflection but carries no value.
    #[must_use]
    pub fn skipped(&self, kind: MetricKind) -> &CellValue {
        self.defaults.get(&kind).unwrap_or(&CellValue::Absent)
    }

    /// Filler for rows accumulated before a metric's column was introduced.
    #[must_use]
    pub fn pre_metric(&self, kind: MetricKind) -> &CellValue {
        self.pre_metric_defaults.get(&kind).unwrap_or(&CellValue::Absent)
    }

    /// Filler for columns a reflection no longer carries.
    #[must_use]
    pub fn post_metric(&self, kind: MetricKind) -> &CellValue {
        self.post_metric_defaults.get(&kind).unwrap_or(&CellValue::Absent)
    }

    fn with_overrides(doc: OptionsDoc) -> Self {
        let mut options = Self::default();
        options.defaults.extend(doc.defaults);
        options.pre_metric_defaults.extend(doc.pre_metric_defaults);
        options.post_metric_defaults.extend(doc.post_metric_defaults);
        options
    }

    /// Recover the on-disk shape, dropping `Absent` entries since those are
    /// the built-ins anyway (and TOML has no way to write them).
    fn as_doc(&self) -> OptionsDoc {
        let keep = |table: &HashMap<MetricKind, CellValue>| {
            table
                .iter()
                .filter(|(_, value)| **value != CellValue::Absent)
                .map(|(kind, value)| (*kind, value.clone()))
                .collect()
        };

        OptionsDoc {
            defaults: keep(&self.defaults),
            pre_metric_defaults: keep(&self.pre_metric_defaults),
            post_metric_defaults: keep(&self.post_metric_defaults),
        }
    }
}

impl Default for ParsingOptions {
    fn default() -> Self {
        let defaults = HashMap::from([
            (MetricKind::String, CellValue::Text(String::new())),
            (MetricKind::Choice, CellValue::Absent),
            (MetricKind::Bool, CellValue::Bool(false)),
            (MetricKind::Unit, CellValue::Number(0.0)),
            (MetricKind::Rating, CellValue::Absent),
            (MetricKind::Scalar, CellValue::Absent),
        ]);

        let all_absent: HashMap<_, _> = MetricKind::iter().map(|kind| (kind, CellValue::Absent)).collect();

        Self {
            defaults,
            pre_metric_defaults: all_absent.clone(),
            post_metric_defaults: all_absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_defaults() {
        let options = ParsingOptions::default();
        assert_eq!(*options.skipped(MetricKind::String), CellValue::Text(String::new()));
        assert_eq!(*options.skipped(MetricKind::Bool), CellValue::Bool(false));
        assert_eq!(*options.skipped(MetricKind::Unit), CellValue::Number(0.0));
        assert_eq!(*options.skipped(MetricKind::Rating), CellValue::Absent);
        assert_eq!(*options.skipped(MetricKind::Choice), CellValue::Absent);
        assert_eq!(*options.skipped(MetricKind::Scalar), CellValue::Absent);

        for kind in MetricKind::iter() {
            assert_eq!(*options.pre_metric(kind), CellValue::Absent);
            assert_eq!(*options.post_metric(kind), CellValue::Absent);
        }
    }

    #[test]
    fn test_embedded_default_document_matches_builtins() {
        let doc: OptionsDoc = serde_yaml::from_str(DEFAULT_OPTIONS_YAML).unwrap();
        assert_eq!(ParsingOptions::with_overrides(doc), ParsingOptions::default());
    }

    #[test]
    fn test_partial_override_keeps_other_builtins() {
        let doc: OptionsDoc = serde_yaml::from_str("defaults:\n  rating: -1\n").unwrap();
        let options = ParsingOptions::with_overrides(doc);

        assert_eq!(*options.skipped(MetricKind::Rating), CellValue::Number(-1.0));
        assert_eq!(*options.skipped(MetricKind::Bool), CellValue::Bool(false));
        assert_eq!(*options.pre_metric(MetricKind::Rating), CellValue::Absent);
    }

    #[test]
    fn test_unrecognized_kind_is_rejected() {
        let result: Result<OptionsDoc, _> = serde_yaml::from_str("defaults:\n  duration: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unrecognized_section_is_rejected() {
        let result: Result<OptionsDoc, _> = serde_yaml::from_str("mid_metric_defaults:\n  rating: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "post_metric_defaults:\n  bool: false").unwrap();
        drop(file);

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        let options = ParsingOptions::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(*options.post_metric(MetricKind::Bool), CellValue::Bool(false));
        assert_eq!(*options.post_metric(MetricKind::Rating), CellValue::Absent);
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        std::fs::write(&path, "[defaults]\nstring = \"skipped\"\n").unwrap();

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        let options = ParsingOptions::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(*options.skipped(MetricKind::String), CellValue::Text("skipped".to_string()));
    }

    #[test]
    fn test_load_without_candidates_uses_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let options = ParsingOptions::load(&base, None).unwrap();
        assert_eq!(options, ParsingOptions::default());
    }

    #[test]
    fn test_load_probes_candidate_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reflect-options.yml"), "defaults:\n  unit: 99\n").unwrap();

        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let options = ParsingOptions::load(&base, None).unwrap();
        assert_eq!(*options.skipped(MetricKind::Unit), CellValue::Number(99.0));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.ini");
        std::fs::write(&path, "").unwrap();

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        assert!(ParsingOptions::load(Utf8Path::new("."), Some(&path)).is_err());
    }

    #[test]
    fn test_write_default_roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("options.toml")).unwrap();

        ParsingOptions::write_default(&path).unwrap();
        let options = ParsingOptions::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(options, ParsingOptions::default());
    }
}
