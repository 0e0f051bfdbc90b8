//! # LaundryBot Chat Command
//!
//! File: cli/src/commands/chat/mod.rs
//!
//! ## Overview
//!
//! A REPL-style chat with the assistant. Each non-empty line is passed to the
//! resolver and the reply is appended to the session transcript and printed.
//! Blank lines are skipped here, since the resolver is never asked to handle
//! "no message". Typing `bye` or `keluar` (or closing stdin) ends the session.
//!
//! ```bash
//! laundrybot chat
//! laundrybot chat --seed 7   # reproducible greeting choices
//! ```
//!
use super::AppContext;
use crate::core::error::Result;
use crate::resolver::{IndexSource, Resolver, SeededIndex, UniformIndex};
use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub mod transcript;

use transcript::{Sender, Transcript};

const EXIT_WORDS: &[&str] = &["bye", "keluar"];

/// Arguments for `laundrybot chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Name the assistant uses in the conversation.
    #[arg(long, default_value = "LaundryBot")]
    pub name: String,

    /// Seed the greeting picker so a session can be replayed.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn handle_chat(args: ChatArgs, ctx: &AppContext) -> Result<()> {
    info!("Starting chat session as {}", args.name);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let transcript = match args.seed {
        Some(seed) => {
            debug!("Using seeded greeting picker (seed {})", seed);
            let resolver = Resolver::with_index_source(ctx.catalog.clone(), SeededIndex::new(seed));
            run_session(&resolver, &args.name, stdin.lock(), stdout.lock())?
        }
        None => {
            let resolver = Resolver::with_index_source(ctx.catalog.clone(), UniformIndex);
            run_session(&resolver, &args.name, stdin.lock(), stdout.lock())?
        }
    };

    info!("Chat session ended after {} messages", transcript.len());
    Ok(())
}

/// Runs one chat session over the given reader and writer.
pub fn run_session<S, R, W>(
    resolver: &Resolver<S>,
    bot_name: &str,
    mut input: R,
    mut output: W,
) -> Result<Transcript>
where
    S: IndexSource,
    R: BufRead,
    W: Write,
{
    let catalog = resolver.catalog();
    writeln!(output, "Chat with {}! Type 'bye' to quit.", bot_name)?;
    if !catalog.suggestions().is_empty() {
        writeln!(output, "Try: {}", catalog.suggestions().join(" | "))?;
    }

    let mut transcript = Transcript::default();
    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read chat input")?;
        if read == 0 {
            writeln!(output)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            writeln!(output, "{}: Sampai jumpa!", bot_name)?;
            break;
        }

        transcript.push(Sender::User, trimmed);
        let reply = resolver.resolve(trimmed);
        let message = transcript.push(Sender::Bot, reply);
        writeln!(
            output,
            "[{}] {}: {}",
            message.sent_at.format("%H:%M"),
            bot_name,
            message.text
        )?;
    }
    Ok(transcript)
}
