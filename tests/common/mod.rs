//! Common test utilities and fixtures for pony-docgen integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating Next.js-shaped source trees
//! - Custom assertions for validating CLI output

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;

pub use assertions::*;
pub use test_repo::TestRepo;
