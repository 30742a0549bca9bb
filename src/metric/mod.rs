//! Metric decoding from the tagged wire representation.
//!
//! A Reflect export carries each metric as a one-of-six tagged union where the
//! wrapper key names the kind (`{"rating": {"_0": {"name": ..., "score": ...}}}`).
//! That encoding is a boundary detail: decoding produces a [`DecodedMetric`]
//! with a plain [`MetricKind`] and an optional [`CellValue`], and nothing past
//! this module ever sees the wrapper shape.

mod cell;
mod decode;
mod kind;

pub use cell::CellValue;
pub use decode::{DecodedMetric, RawMetric, RawReflection, decode_metric, parse_reflections};
pub use kind::MetricKind;
