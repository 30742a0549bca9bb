use crate::Result;
use crate::metric::{CellValue, MetricKind};
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use serde_json::Value;

/// One reflection instance exactly as it appears in the export document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReflection {
    pub id: String,
    pub name: String,
    pub date: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub metrics: Vec<RawMetric>,
}

/// One metric entry in its wire form. The `kind` map is the tagged union
/// wrapper: exactly one key naming the kind, wrapping the `_0` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetric {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default = "recorded_default")]
    pub recorded: bool,
    pub kind: serde_json::Map<String, Value>,
}

const fn recorded_default() -> bool {
    true
}

/// A metric after boundary decoding.
///
/// `value` is `None` for entries the user explicitly skipped
/// (`recorded: false`) and for entries whose kind-specific value field is
/// missing; the engine substitutes the configured default in both cases.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMetric {
    pub name: String,
    pub kind: MetricKind,
    pub value: Option<CellValue>,
}

/// Parse a reflections export document into its raw record sequence.
pub fn parse_reflections(json: &str) -> Result<Vec<RawReflection>> {
    serde_json::from_str(json).into_app_err("parsing reflections document")
}

/// Decode one metric entry from its tagged wire form.
///
/// # Errors
///
/// Returns an error when the kind tag is missing, empty, ambiguous, or
/// unrecognized, when the `_0` body or `name` is missing, or when the
/// kind-specific value field is present but of the wrong type.
pub fn decode_metric(metric: &RawMetric) -> Result<DecodedMetric> {
    let mut tags = metric.kind.iter();
    let Some((tag, payload)) = tags.next() else {
        return Err(app_err!("metric entry has no kind tag"));
    };

    if tags.next().is_some() {
        return Err(app_err!("metric entry has more than one kind tag"));
    }

    // Unrecognized tags are reserved for future kinds and must never be
    // silently dropped.
    let kind = match tag.as_str() {
        "string" => MetricKind::String,
        "choice" => MetricKind::Choice,
        "bool" => MetricKind::Bool,
        "unit" => MetricKind::Unit,
        "rating" => MetricKind::Rating,
        "scalar" => MetricKind::Scalar,
        "" => return Err(app_err!("metric entry has an empty kind tag")),
        other => return Err(app_err!("unrecognized metric kind tag '{other}'")),
    };

    let body = payload
        .get("_0")
        .and_then(Value::as_object)
        .ok_or_else(|| app_err!("{kind} metric payload has no '_0' body"))?;

    let name = body
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| app_err!("{kind} metric has no name"))?
        .to_string();

    if !metric.recorded {
        return Ok(DecodedMetric { name, kind, value: None });
    }

    let field = value_field(kind);
    let value = match body.get(field) {
        None | Some(Value::Null) => None,
        Some(raw) => {
            let decoded =
                decode_value(kind, raw).ok_or_else(|| app_err!("{kind} metric '{name}' has a malformed '{field}' field"))?;
            Some(decoded)
        }
    };

    Ok(DecodedMetric { name, kind, value })
}

/// Name of the kind-specific value field inside the `_0` body. The `unit`
/// label next to a unit metric's `value` and the full option list next to a
/// choice metric's `choice` are carried on the wire but never interpreted.
const fn value_field(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::String => "string",
        MetricKind::Choice => "choice",
        MetricKind::Bool => "bool",
        MetricKind::Unit => "value",
        MetricKind::Rating => "score",
        MetricKind::Scalar => "scalar",
    }
}

fn decode_value(kind: MetricKind, raw: &Value) -> Option<CellValue> {
    match kind {
        MetricKind::String | MetricKind::Choice => raw.as_str().map(|s| CellValue::Text(s.to_string())),
        MetricKind::Bool => raw.as_bool().map(CellValue::Bool),
        MetricKind::Unit | MetricKind::Rating | MetricKind::Scalar => raw.as_f64().map(CellValue::Number),
    }
}
