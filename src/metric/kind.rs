use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The six typed shapes a metric can take in a Reflect export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetricKind {
    String,
    Choice,
    Bool,
    Unit,
    Rating,
    Scalar,
}
