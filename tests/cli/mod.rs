//! CLI command integration tests

pub mod generate_tests;
pub mod inject_tests;
