//! # LaundryBot Response Templating
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders the response templates of the catalog with Tera. Templates are
//! plain text (they end up in a chat bubble or a terminal), so autoescaping
//! is turned off.
//!
//! Rendering happens once, while the catalog is built. A template that fails
//! to render is a catalog error reported at startup, so the resolver never
//! has to deal with rendering failures.
//!
//! ```rust,ignore
//! let mut context = HashMap::new();
//! context.insert("contact".to_string(), "0812-3456-7890".to_string());
//! let text = templating::render_template("default", "Hubungi {{ contact }}.", &context)?;
//! ```
//!
use crate::core::error::{LaundryError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

/// Renders a single named template against a flat string context.
///
/// `name` is only used to label errors and log lines.
pub fn render_template(
    name: &str,
    template: &str,
    context_map: &HashMap<String, String>,
) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context_map).map_err(|e| {
        anyhow!(LaundryError::Template { source: e })
            .context("Failed to create Tera context from map")
    })?;

    let rendered = Tera::one_off(template, &tera_context, false).map_err(|e| {
        anyhow!(LaundryError::Template { source: e })
            .context(format!("Tera rendering failed for template '{}'", name))
    })?;
    debug!("Rendered template '{}' ({} bytes)", name, rendered.len());
    Ok(rendered)
}
