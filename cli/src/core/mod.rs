//! # LaundryBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure the resolver and commands sit on:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Tera rendering for the catalog's response templates
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{LaundryError, Result}; // For error handling
//! use crate::core::templating; // For rendering response templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
