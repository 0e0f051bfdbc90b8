//! # LaundryBot Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! Resolves one message passed on the command line and prints the reply.
//!
//! ```bash
//! laundrybot ask berapa harga cuci sepatu
//! laundrybot ask --explain "proses alas kasur berapa lama"
//! ```
//!
use super::AppContext;
use crate::core::error::Result;
use crate::resolver::{IndexSource, Resolution, Resolver};
use clap::Parser;
use std::io::Write;
use tracing::info;

/// Arguments for `laundrybot ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to resolve. Multiple words are joined with spaces.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub message: Vec<String>,

    /// Also print the matched category and service.
    #[arg(long, short)]
    pub explain: bool,
}

pub fn handle_ask(args: AskArgs, ctx: &AppContext) -> Result<()> {
    let message = args.message.join(" ");
    info!("Resolving one-shot message: {:?}", message);
    let resolver = Resolver::new(ctx.catalog.clone());
    let stdout = std::io::stdout();
    write_answer(&resolver, &message, args.explain, &mut stdout.lock())
}

fn write_answer<S: IndexSource, W: Write>(
    resolver: &Resolver<S>,
    message: &str,
    explain: bool,
    out: &mut W,
) -> Result<()> {
    let resolution = resolver.explain(message);
    if explain {
        writeln!(out, "{}", describe(&resolution))?;
    }
    writeln!(out, "{}", resolution.reply)?;
    Ok(())
}

fn describe(resolution: &Resolution) -> String {
    let category = resolution
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());
    let service = resolution
        .service
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!("[category: {}, service: {}]", category, service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Catalog, FixedIndex, ServiceKey};
    use std::sync::Arc;

    #[test]
    fn test_write_answer_with_explain() -> Result<()> {
        let catalog = Arc::new(Catalog::builtin()?);
        let resolver = Resolver::with_index_source(catalog.clone(), FixedIndex(0));
        let mut out = Vec::new();

        write_answer(&resolver, "harga sepatu", true, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.starts_with("[category: price, service: shoe_wash]\n"));
        assert!(text.ends_with(&format!(
            "{}\n",
            catalog.service_responses(ServiceKey::ShoeWash).price_detail
        )));
        Ok(())
    }

    #[test]
    fn test_describe_unmatched() {
        let resolution = Resolution {
            category: None,
            service: None,
            reply: "x".into(),
        };
        assert_eq!(describe(&resolution), "[category: none, service: none]");
    }
}
