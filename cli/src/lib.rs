//! # LaundryBot Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Library side of the `laundrybot` crate. The binary in `main.rs` and the
//! integration tests in `tests/` both build on these modules:
//! - `resolver`: the message-to-reply engine and its catalog
//! - `core`: configuration, errors and templating
//! - `commands`: the `ask`, `catalog`, `chat` and `serve` commands
//!
pub mod commands;
pub mod core;
pub mod resolver;
