use serde::{Deserialize, Serialize};

/// One table cell value.
///
/// `Absent` is the defined "no value" sentinel used by the default tables; it
/// serializes as `null` in options documents and renders as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Absent,
}

impl CellValue {
    /// Render this cell as a CSV field.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(t) => t.clone(),
        }
    }
}

/// Integral magnitudes are written without a decimal point so a rating of 5
/// comes out as `5`, not `5.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}
