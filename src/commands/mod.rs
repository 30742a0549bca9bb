mod common;
mod export;
mod init;
mod validate;

pub use export::{ExportArgs, run_export};
pub use init::{InitArgs, init_options};
pub use validate::{ValidateArgs, validate_options};
