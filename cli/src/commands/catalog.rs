//! # LaundryBot Catalog Command
//!
//! File: cli/src/commands/catalog.rs
//!
//! Prints the services the assistant knows about, with their price tables,
//! process times and the support contact.
//!
//! ```bash
//! laundrybot catalog
//! laundrybot catalog --service shoe_wash
//! ```
//!
use super::AppContext;
use crate::core::error::Result;
use crate::resolver::catalog::{format_price_table, ServiceCatalogEntry};
use crate::resolver::{Catalog, ServiceKey};
use clap::Parser;
use std::io::Write;

/// Arguments for `laundrybot catalog`.
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Only show one service (wash_iron, iron_only, shoe_wash, bed_linen).
    #[arg(long, short)]
    pub service: Option<String>,
}

pub fn handle_catalog(args: CatalogArgs, ctx: &AppContext) -> Result<()> {
    let only = args
        .service
        .as_deref()
        .map(str::parse::<ServiceKey>)
        .transpose()?;
    let stdout = std::io::stdout();
    write_catalog(&ctx.catalog, only, &mut stdout.lock())
}

fn write_catalog<W: Write>(catalog: &Catalog, only: Option<ServiceKey>, out: &mut W) -> Result<()> {
    let entries: Vec<&ServiceCatalogEntry> = match only {
        Some(key) => vec![catalog.service(key)],
        None => catalog.services().iter().collect(),
    };
    for entry in entries {
        writeln!(out, "{} ({})", entry.display_name, entry.key)?;
        writeln!(out, "  Proses: {}", entry.process_time_text)?;
        for line in format_price_table(&entry.price_table).lines() {
            writeln!(out, "  {}", line)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Kontak: {}", catalog.support_contact())?;
    writeln!(out, "WhatsApp: {}", catalog.whatsapp_link())?;
    Ok(())
}
