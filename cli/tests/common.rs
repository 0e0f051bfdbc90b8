//! # LaundryBot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use laundrybot::resolver::{Catalog, FixedIndex, Resolver};
use std::sync::Arc;

/// # Get LaundryBot Command (`laundrybot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `laundrybot` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn laundrybot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("laundrybot").expect("Failed to find laundrybot binary for testing");
    cmd.env_remove("LAUNDRYBOT_CATALOG").env_remove("RUST_LOG");
    cmd
}

/// The built-in catalog, shared behind an `Arc` as the binary does.
pub fn builtin_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("built-in catalog must load"))
}

/// Resolver whose greeting choice is pinned to `index`.
pub fn pinned_resolver(index: usize) -> Resolver<FixedIndex> {
    Resolver::with_index_source(builtin_catalog(), FixedIndex(index))
}
