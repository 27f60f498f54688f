// SPDX-License-Identifier: MIT
//
// mpedit — MetaPost highlighting and auto-indent, from the command line.
//
// This is the shell around the two library crates:
//
//   mpedit-core → styled buffer, classifier, indentation, edit engine
//   mpedit-term → palette and ANSI span output
//
// A file flows through:
//
//   FILE/stdin → paste or typed replay → Engine → styled spans
//   spans → palette → SpanWriter → stdout
//   caret → line:col → stderr

mod cli;
mod logging;
mod replay;

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use mpedit_core::Engine;
use mpedit_term::{Palette, SpanWriter, display_col};
use tracing::{debug, info};

use crate::cli::CliArgs;

fn main() {
    let args = CliArgs::parse();
    logging::init();

    if let Err(e) = run(&args) {
        eprintln!("mpedit: {e:#}");
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;

    let mut engine = Engine::new();
    for set in &args.set {
        let shown = engine
            .set(set)
            .with_context(|| format!("--set {set}"))?;
        if let Some(msg) = shown {
            eprintln!("{msg}");
        }
    }

    let mut palette = if args.plain {
        Palette::plain()
    } else {
        Palette::default()
    };
    for entry in &args.palette {
        palette
            .set_entry(entry)
            .with_context(|| format!("--palette {entry}"))?;
    }

    if args.typed {
        let stats = replay::type_text(&mut engine, &text)?;
        info!(
            chars = stats.chars,
            enters = stats.enters,
            backspaces = stats.backspaces,
            "typed"
        );
    } else {
        replay::paste(&mut engine, &text)?;
    }
    debug!(len = engine.len(), revision = engine.revision(), "loaded");

    let spans = engine.styled_spans(0..engine.len())?;
    let mut out = BufWriter::new(io::stdout().lock());
    if args.spans {
        for span in &spans {
            writeln!(out, "{}\t{}", span.style, span.text.escape_debug())?;
        }
    } else {
        SpanWriter::new().write_spans(&mut out, &spans, &palette)?;
    }
    out.flush()?;

    let (line, col) = caret_line_col(&engine);
    eprintln!("{line}:{col}");
    Ok(())
}

/// 1-indexed caret line and terminal column. Lines are counted the way the
/// rope counts them, so any line separator it knows starts a new line.
fn caret_line_col(engine: &Engine) -> (usize, usize) {
    let pos = engine.caret_position();
    let line = engine
        .buffer()
        .rope()
        .get_line(pos.line)
        .map(|line| line.to_string())
        .unwrap_or_default();
    (pos.line + 1, display_col(&line, pos.col) + 1)
}

/// Read the whole input: the named file, or stdin for `None` or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            Ok(text)
        }
    }
}
