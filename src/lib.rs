//! reflect-export crate
//!
//! This crate is an implementation detail of the `reflect-export` tool. This crate's API is fluid and may change without
//! warning and in a semver-incompatible way.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod convert;

#[doc(hidden)]
pub mod export;

#[doc(hidden)]
pub mod metric;

#[doc(hidden)]
pub mod options;
