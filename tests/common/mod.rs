//! Common test infrastructure
//!
//! Fixtures for the pipeline tests: a stub classifier, an in-memory catalog
//! and a catalog export written to a temporary directory.
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{fixture_catalog, fixture_records, generator_for, write_catalog_file, StubClassifier};
