//! Export core modules shared by the CLI and other front ends.

#[cfg(feature = "excel")]
pub mod excel_core;
