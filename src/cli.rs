// SPDX-License-Identifier: MIT
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Highlight and auto-indent a MetaPost file the way the editor would.
#[derive(Parser, Debug)]
#[command(name = "mpedit", version, about)]
pub struct CliArgs {
    /// File to load; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Editor options, as after `:set` (e.g. `noai ul=50`). Repeatable
    #[arg(short = 's', long = "set", value_name = "ARGS")]
    pub set: Vec<String>,

    /// Type the file keystroke by keystroke instead of pasting it
    #[arg(short = 't', long = "type")]
    pub typed: bool,

    /// Print one `STYLE<TAB>text` line per styled span instead of colors
    #[arg(long)]
    pub spans: bool,

    /// Override a palette entry: `STYLE=COLOR[,ATTRS]`. Repeatable
    #[arg(short = 'p', long = "palette", value_name = "ENTRY")]
    pub palette: Vec<String>,

    /// Print the text without any styling
    #[arg(long, conflicts_with = "spans")]
    pub plain: bool,
}
